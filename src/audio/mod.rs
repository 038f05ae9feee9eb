pub mod assembler;
pub mod decoder;
pub mod encoder;
pub mod resample;
pub mod silence;

pub use assembler::assemble_audio;
pub use decoder::{decode_audio, find_section_audio};
pub use encoder::encode_audio;
pub use silence::silence_chunk;
