pub mod codec;

pub use codec::{
    decode_png, encode_png, encode_value_field, optimize_png, read_image, write_image,
};
