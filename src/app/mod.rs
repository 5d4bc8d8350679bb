mod builder;
mod keymap;
mod options;
mod popup;
mod runtime;
mod status;
mod terminal;

pub use builder::FieldBuilderUi;
pub use options::UiOptions;

#[cfg(test)]
pub(crate) use keymap::{KeyCommand, Pane, classify};
#[cfg(test)]
pub(crate) use runtime::App;
