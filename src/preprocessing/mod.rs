pub mod label_encoding;
pub mod split;

pub use label_encoding::{encode_labels, LabelEncoding};
pub use split::{train_test_split, Partition};
