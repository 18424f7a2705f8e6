mod dictionary_exchange;
mod frame_io;
mod header_io;

pub use dictionary_exchange::{recv_dictionary, send_dictionary};
pub use frame_io::{read_frame, write_frame};
pub use header_io::{recv_header, send_header};
