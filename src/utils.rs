mod buffer_pool;
mod free_list;

pub use buffer_pool::BufferPool;
pub use free_list::FreeList;
