mod choices;
mod fields;
mod footer;
mod layout;
mod list;
mod popup;

pub use fields::render_editor;
pub use footer::render_footer;
pub use list::render_record_list;
pub use popup::render_popup;
