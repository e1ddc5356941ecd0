mod arena;
mod handle;
mod node;
mod raw_osavl_tree;
mod size;

pub(crate) use handle::Handle;
pub(crate) use raw_osavl_tree::RawOSAvlTree;
