pub mod category;
pub mod index;
pub mod letter_file;

pub use category::{Category, DateKey};
pub use index::FileIndex;
pub use letter_file::{combined_file_name, report_file_name, student_id, student_id_from_path};
