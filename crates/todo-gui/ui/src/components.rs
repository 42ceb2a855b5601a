mod filter_bar;
mod notice_toasts;
mod paginator;
mod todo_modal;
mod todo_row;
mod todo_table;

pub use filter_bar::FilterBar;
pub use notice_toasts::NoticeToasts;
pub use paginator::Paginator;
pub use todo_modal::TodoModal;
pub use todo_row::TodoRow;
pub use todo_table::TodoTable;
