//! Runtime type descriptors and the [`Object`] capability.
//!
//! Every type that takes part in the identity system has exactly one
//! [`TypeInfo`]: the hash of its name, the name itself and a link to the
//! descriptor of its base type. Descriptors are built lazily on first access
//! and never change afterwards.
//!
//! Base types are not limited to concrete structs: the abstract roots
//! `dyn Object` and `dyn Component` carry descriptors too, so a concrete
//! component can be asked whether it "is a" `Component`.
//!
//! # Declaring a type
//!
//! ```ignore
//! #[derive(Default)]
//! pub struct Spinner { pub degrees_per_step: f32 }
//! aberredscene::component_type!(Spinner, "Spinner");
//! ```
//!
//! [`object_type!`](crate::object_type) declares a plain object,
//! [`component_type!`](crate::component_type) a component that the
//! [`Factory`](crate::core::factory::Factory) can attach to scene nodes.

use std::any::Any;
use std::fmt;

use log::warn;

use crate::components::component::Component;
use crate::core::hash::StringHash;

/// Lazily initialized storage for a type's descriptor.
pub use once_cell::sync::OnceCell as TypeInfoCell;

/// Immutable identity record of one type.
pub struct TypeInfo {
    hash: StringHash,
    name: &'static str,
    base: Option<&'static TypeInfo>,
}

impl TypeInfo {
    pub const fn new(name: &'static str, base: Option<&'static TypeInfo>) -> Self {
        Self {
            hash: StringHash::new(name),
            name,
            base,
        }
    }

    pub fn hash(&self) -> StringHash {
        self.hash
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base(&self) -> Option<&'static TypeInfo> {
        self.base
    }

    /// Returns true if `hash` names this type or any of its ancestors.
    pub fn is_type_of(&self, hash: StringHash) -> bool {
        let mut current = Some(self);
        while let Some(info) = current {
            if info.hash == hash {
                return true;
            }
            current = info.base;
        }
        false
    }

    /// Returns true if `other` is this descriptor or one of its ancestors.
    pub fn is_type_of_info(&self, other: &TypeInfo) -> bool {
        let mut current = Some(self);
        while let Some(info) = current {
            if std::ptr::eq(info, other) {
                return true;
            }
            current = info.base;
        }
        false
    }

    pub fn is_type_of_static<T: StaticType + ?Sized>(&self) -> bool {
        self.is_type_of_info(T::type_info_static())
    }

    /// Iterates from this descriptor up to the root.
    pub fn ancestry(&self) -> impl Iterator<Item = &TypeInfo> {
        std::iter::successors(Some(self), |info| info.base)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .field("base", &self.base.map(|b| b.name))
            .finish()
    }
}

/// Access to a type's descriptor without an instance.
pub trait StaticType {
    fn type_info_static() -> &'static TypeInfo;

    fn type_hash_static() -> StringHash {
        Self::type_info_static().hash()
    }

    fn type_name_static() -> &'static str {
        Self::type_info_static().name()
    }
}

static OBJECT_TYPE_INFO: TypeInfo = TypeInfo::new("Object", None);

impl StaticType for dyn Object {
    fn type_info_static() -> &'static TypeInfo {
        &OBJECT_TYPE_INFO
    }
}

/// Base capability of every entity in the identity system.
///
/// Implemented through [`object_type!`](crate::object_type) or
/// [`component_type!`](crate::component_type); manual impls must return the
/// same descriptor as their [`StaticType`] impl.
pub trait Object: Any {
    fn type_info(&self) -> &'static TypeInfo;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Converts a boxed object into a component, if it is one.
    fn into_component(self: Box<Self>) -> Option<Box<dyn Component>> {
        None
    }

    fn type_hash(&self) -> StringHash {
        self.type_info().hash()
    }

    fn type_name(&self) -> &'static str {
        self.type_info().name()
    }

    fn is_instance_of_hash(&self, hash: StringHash) -> bool {
        self.type_info().is_type_of(hash)
    }

    fn is_instance_of_info(&self, info: &TypeInfo) -> bool {
        self.type_info().is_type_of_info(info)
    }
}

/// Returns true if `object`'s descriptor chain contains `T`.
pub fn is_instance_of<T, O>(object: &O) -> bool
where
    T: StaticType + ?Sized,
    O: Object + ?Sized,
{
    object.type_info().is_type_of_info(T::type_info_static())
}

/// Checked downcast to a concrete type. Logs a warning on failure.
pub fn cast_ref<T, O>(object: &O) -> Option<&T>
where
    T: StaticType + 'static,
    O: Object + ?Sized,
{
    let cast = if is_instance_of::<T, O>(object) {
        object.as_any().downcast_ref::<T>()
    } else {
        None
    };
    if cast.is_none() {
        warn!(
            "Failed to cast object '{}' to '{}'",
            object.type_name(),
            T::type_name_static()
        );
    }
    cast
}

/// Mutable counterpart of [`cast_ref`].
pub fn cast_mut<T, O>(object: &mut O) -> Option<&mut T>
where
    T: StaticType + 'static,
    O: Object + ?Sized,
{
    if !is_instance_of::<T, O>(object) {
        warn!(
            "Failed to cast object '{}' to '{}'",
            object.type_name(),
            T::type_name_static()
        );
        return None;
    }
    let type_name = object.type_name();
    let cast = object.as_any_mut().downcast_mut::<T>();
    if cast.is_none() {
        warn!(
            "Failed to cast object '{}' to '{}'",
            type_name,
            T::type_name_static()
        );
    }
    cast
}

impl dyn Object {
    pub fn is_instance_of<T: StaticType + ?Sized>(&self) -> bool {
        is_instance_of::<T, _>(self)
    }

    pub fn downcast_ref<T: StaticType + 'static>(&self) -> Option<&T> {
        cast_ref::<T, _>(self)
    }

    pub fn downcast_mut<T: StaticType + 'static>(&mut self) -> Option<&mut T> {
        cast_mut::<T, _>(self)
    }
}

/// Implements [`StaticType`] for `$ty`: descriptor named `$name`, base `$base`.
///
/// The descriptor is created on first access and lives for the rest of the
/// process.
#[macro_export]
macro_rules! static_type {
    ($ty:ty, $name:literal, $base:ty) => {
        impl $crate::core::typeinfo::StaticType for $ty {
            fn type_info_static() -> &'static $crate::core::typeinfo::TypeInfo {
                static INFO: $crate::core::typeinfo::TypeInfoCell<$crate::core::typeinfo::TypeInfo> =
                    $crate::core::typeinfo::TypeInfoCell::new();
                INFO.get_or_init(|| {
                    $crate::core::typeinfo::TypeInfo::new(
                        $name,
                        Some(<$base as $crate::core::typeinfo::StaticType>::type_info_static()),
                    )
                })
            }
        }
    };
}

/// Declares `$ty` as an [`Object`] named `$name` deriving from `$base`
/// (`dyn Object` when omitted).
#[macro_export]
macro_rules! object_type {
    ($ty:ty, $name:literal) => {
        $crate::object_type!($ty, $name, dyn $crate::core::typeinfo::Object);
    };
    ($ty:ty, $name:literal, $base:ty) => {
        $crate::static_type!($ty, $name, $base);

        impl $crate::core::typeinfo::Object for $ty {
            fn type_info(&self) -> &'static $crate::core::typeinfo::TypeInfo {
                <$ty as $crate::core::typeinfo::StaticType>::type_info_static()
            }
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}

/// Declares `$ty` as a [`Component`](crate::components::component::Component)
/// object named `$name`. The type must also implement `Component`.
#[macro_export]
macro_rules! component_type {
    ($ty:ty, $name:literal) => {
        $crate::component_type!($ty, $name, dyn $crate::components::component::Component);
    };
    ($ty:ty, $name:literal, $base:ty) => {
        $crate::static_type!($ty, $name, $base);

        impl $crate::core::typeinfo::Object for $ty {
            fn type_info(&self) -> &'static $crate::core::typeinfo::TypeInfo {
                <$ty as $crate::core::typeinfo::StaticType>::type_info_static()
            }
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
            fn into_component(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::option::Option<::std::boxed::Box<dyn $crate::components::component::Component>>
            {
                ::std::option::Option::Some(self)
            }
        }
    };
}
