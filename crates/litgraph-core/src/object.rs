//! Dynamically-typed values exchanged through object streams.
//!
//! An object stream decodes one value with some converter and hands it to
//! the caller as an [`Object`]; the caller then dispatches on the concrete
//! variant. The node store uses this to reject anything that is not a
//! [`Node`].

use std::fmt;

use crate::node::Node;

/// A decoded value of any shape known to litgraph.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i32),
    Long(i64),
    Text(String),
    Node(Node),
    Array(Vec<Object>),
}

impl Object {
    /// Short name of the variant, used in type-mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => i32::TYPE_NAME,
            Object::Long(_) => i64::TYPE_NAME,
            Object::Text(_) => String::TYPE_NAME,
            Object::Node(_) => Node::TYPE_NAME,
            Object::Array(_) => "array",
        }
    }

    /// Unwrap a node, handing the object back when it is something else.
    pub fn into_node(self) -> Result<Node, Object> {
        match self {
            Object::Node(node) => Ok(node),
            other => Err(other),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(v) => write!(f, "{v}"),
            Object::Long(v) => write!(f, "{v}L"),
            Object::Text(s) => write!(f, "{s:?}"),
            Object::Node(n) => write!(f, "{n}"),
            Object::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A Rust value that can travel through an object stream.
pub trait ObjectValue: Sized {
    /// Name reported when an object of another shape is found instead.
    const TYPE_NAME: &'static str;

    fn into_object(self) -> Object;

    /// Convert back, or `None` when the object has a different shape.
    fn from_object(object: Object) -> Option<Self>;
}

impl ObjectValue for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn into_object(self) -> Object {
        Object::Integer(self)
    }

    fn from_object(object: Object) -> Option<Self> {
        match object {
            Object::Integer(v) => Some(v),
            _ => None,
        }
    }
}

impl ObjectValue for i64 {
    const TYPE_NAME: &'static str = "long";

    fn into_object(self) -> Object {
        Object::Long(self)
    }

    fn from_object(object: Object) -> Option<Self> {
        match object {
            Object::Long(v) => Some(v),
            _ => None,
        }
    }
}

impl ObjectValue for String {
    const TYPE_NAME: &'static str = "text";

    fn into_object(self) -> Object {
        Object::Text(self)
    }

    fn from_object(object: Object) -> Option<Self> {
        match object {
            Object::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl ObjectValue for Node {
    const TYPE_NAME: &'static str = "node";

    fn into_object(self) -> Object {
        Object::Node(self)
    }

    fn from_object(object: Object) -> Option<Self> {
        object.into_node().ok()
    }
}

impl<T: ObjectValue> ObjectValue for Vec<T> {
    const TYPE_NAME: &'static str = "array";

    fn into_object(self) -> Object {
        Object::Array(self.into_iter().map(ObjectValue::into_object).collect())
    }

    fn from_object(object: Object) -> Option<Self> {
        match object {
            Object::Array(items) => items.into_iter().map(T::from_object).collect(),
            _ => None,
        }
    }
}

/// A cursor that yields decoded objects.
pub trait ObjectSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether another object can be read without hitting end of input.
    fn has_more(&mut self) -> Result<bool, Self::Error>;

    /// Decode the next object.
    fn read_object(&mut self) -> Result<Object, Self::Error>;
}

/// A cursor that accepts objects for encoding.
pub trait ObjectSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_object(&mut self, object: Object) -> Result<(), Self::Error>;

    fn flush(&mut self) -> Result<(), Self::Error>;
}
