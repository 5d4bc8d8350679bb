mod support;

mod app_tests;
mod editor_tests;
