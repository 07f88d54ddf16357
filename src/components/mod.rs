//! UI Components
//!
//! Reusable Leptos components.

mod confirm_button;
mod field_inputs;
mod new_record_form;
mod profile_tab_bar;
mod record_editor;
mod record_list;
mod record_row;
mod summary_bar;
mod toast_area;
mod toolbar;

pub use confirm_button::ConfirmButton;
pub use field_inputs::FieldInputs;
pub use new_record_form::NewRecordForm;
pub use profile_tab_bar::ProfileTabBar;
pub use record_editor::RecordEditor;
pub use record_list::RecordList;
pub use record_row::RecordRow;
pub use summary_bar::SummaryBar;
pub use toast_area::ToastArea;
pub use toolbar::Toolbar;
