mod pack_vm;
mod quiz_vm;
mod summary_vm;

pub use pack_vm::{PackCardVm, map_pack_cards};
pub use quiz_vm::{Notice, QuizEffect, QuizIntent, QuizVm, progress_label};
pub use summary_vm::{SummaryVm, map_summary};
