//! Descriptor values: the declarative layout of one field.

use alloc::string::String;

use crate::format::Align;

/// Layout of a scalar field, a single fixed-width slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldDescriptor {
    /// Order of the field within its record.
    pub position: u32,
    /// Width of the slice.
    pub length: usize,
    /// Whether the width always counts toward the minimum record length.
    pub required: bool,
    /// Whether the codec skips the field when populating a record.
    pub ignore: bool,
    /// Overrides the configured alignment.
    pub align: Option<Align>,
    /// Overrides the configured fill character.
    pub padding: Option<char>,
}

impl FieldDescriptor {
    pub fn new(position: u32, length: usize) -> Self {
        Self {
            position,
            length,
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn padding(mut self, padding: char) -> Self {
        self.padding = Some(padding);
        self
    }

    /// A zero-width descriptor declares nothing.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Layout of a field holding a nested record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompositeDescriptor {
    pub position: u32,
    pub required: bool,
    pub ignore: bool,
    /// Literal prefix recognising an instance by lookahead. Empty when unused.
    pub identification: String,
}

impl CompositeDescriptor {
    pub fn new(position: u32) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn identification(mut self, identification: impl Into<String>) -> Self {
        self.identification = identification.into();
        self
    }
}

/// Layout of a sequence of nested records.
///
/// Repetition ends either after the number of elements given by the counter,
/// or once the next bytes no longer start with the element's identification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GroupDescriptor {
    pub position: u32,
    pub required: bool,
    pub ignore: bool,
    /// Slice holding the number of elements that follow.
    pub counter: Option<FieldDescriptor>,
    /// Layout of one element. Its position is not used.
    pub element: CompositeDescriptor,
}

impl GroupDescriptor {
    pub fn new(position: u32) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn counter(mut self, counter: FieldDescriptor) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn element(mut self, element: CompositeDescriptor) -> Self {
        self.element = element;
        self
    }
}

/// Layout of a counted sequence of scalar values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListDescriptor {
    pub position: u32,
    pub required: bool,
    pub ignore: bool,
    pub counter: FieldDescriptor,
    pub element: FieldDescriptor,
}

impl ListDescriptor {
    pub fn new(position: u32, counter: FieldDescriptor, element: FieldDescriptor) -> Self {
        Self {
            position,
            required: false,
            ignore: false,
            counter,
            element,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }
}

/// The descriptor declared on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldKind {
    Scalar(FieldDescriptor),
    Composite(CompositeDescriptor),
    Group(GroupDescriptor),
    List(ListDescriptor),
}

impl From<FieldDescriptor> for FieldKind {
    fn from(descriptor: FieldDescriptor) -> Self {
        Self::Scalar(descriptor)
    }
}

impl From<CompositeDescriptor> for FieldKind {
    fn from(descriptor: CompositeDescriptor) -> Self {
        Self::Composite(descriptor)
    }
}

impl From<GroupDescriptor> for FieldKind {
    fn from(descriptor: GroupDescriptor) -> Self {
        Self::Group(descriptor)
    }
}

impl From<ListDescriptor> for FieldKind {
    fn from(descriptor: ListDescriptor) -> Self {
        Self::List(descriptor)
    }
}
