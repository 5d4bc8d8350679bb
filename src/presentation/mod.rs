mod components;
mod view;

pub(crate) use view::{PopupRender, UiContext, draw};
