//! UI Components
//!
//! Leptos components for the todo view.

mod new_todo_form;
mod search_box;
mod filter_bar;
mod todo_row;
mod todo_list;
mod todo_footer;

pub use new_todo_form::NewTodoForm;
pub use search_box::SearchBox;
pub use filter_bar::FilterBar;
pub use todo_row::TodoRow;
pub use todo_list::TodoList;
pub use todo_footer::TodoFooter;
