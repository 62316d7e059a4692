use crate::{
    pdf::{Object, Reference},
    writer::{Encoder, Writer},
};

use super::SimpleEncoder;

pub(crate) mod array;
pub(crate) mod dictionary;
pub(crate) mod name;
pub(crate) mod string;

pub const TRUE_OBJECT: &str = "true";
pub const FALSE_OBJECT: &str = "false";
pub const NULL_OBJECT: &str = "null";

/// Text of a real number. Non-finite values have no representation and are
/// written as `0`.
pub(crate) fn format_real(f: f64) -> String {
    if f.is_finite() {
        // adding 0.0 turns -0 into 0
        (f + 0.0).to_string()
    } else {
        log::warn!("Non-finite real {} written as 0", f);
        "0".to_owned()
    }
}

impl Encoder<Reference> for SimpleEncoder {
    fn encoded_len(r: &Reference) -> usize {
        r.to_string().len()
    }

    fn write_to(r: &Reference, writer: &mut dyn Writer) {
        writer.write(r.to_string().as_bytes());
    }
}

impl Encoder<Object> for SimpleEncoder {
    fn encoded_len(obj: &Object) -> usize {
        match obj {
            Object::String(s) => Self::encoded_len(s),
            Object::Real(f) => format_real(*f).len(),
            Object::Integer(i) => i.to_string().len(),
            Object::Bool(true) => TRUE_OBJECT.len(),
            Object::Bool(false) => FALSE_OBJECT.len(),
            Object::Name(n) => Self::encoded_len(n),
            Object::Array(a) => Self::encoded_len(a),
            Object::Dictionary(d) => Self::encoded_len(d),
            Object::Reference(r) => Self::encoded_len(r),
            Object::Null => NULL_OBJECT.len(),
            Object::Absent => 0,
        }
    }

    fn write_to(obj: &Object, writer: &mut dyn Writer) {
        match obj {
            Object::String(s) => Self::write_to(s, writer),
            Object::Real(f) => writer.write(format_real(*f).as_bytes()),
            Object::Integer(i) => writer.write(i.to_string().as_bytes()),
            Object::Bool(true) => writer.write(TRUE_OBJECT.as_bytes()),
            Object::Bool(false) => writer.write(FALSE_OBJECT.as_bytes()),
            Object::Name(n) => Self::write_to(n, writer),
            Object::Array(a) => Self::write_to(a, writer),
            Object::Dictionary(d) => Self::write_to(d, writer),
            Object::Reference(r) => Self::write_to(r, writer),
            Object::Null => writer.write(NULL_OBJECT.as_bytes()),
            Object::Absent => {}
        }
    }
}
