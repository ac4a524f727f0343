pub mod fsutil;
pub mod logging;
pub mod race;
pub mod record;
pub mod text;

pub use race::{
    find_fastest_runner, find_fastest_runner_with, find_mean_finish_time,
    find_mean_finish_time_with, Backend, RaceQuery, RaceResult,
};
pub use record::{read_records, record_data, Record, Value};
pub use text::{count_instances_of_word_in_file, write_t_after_first_a, write_text_to_file};
