//! Integration tests exercising the public API end to end.

mod editor_ops;
mod scripts;
mod source_tree;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
