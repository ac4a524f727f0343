pub mod count;
pub mod mutate;

pub use count::{count_instances_of_word_in_file, count_word};
pub use mutate::{insert_t_after_first_a, write_t_after_first_a, write_text_to_file};
