//! Declaration ergonomics: `wml_tag!` and `wml_tag_union!`.
//!
//! A record declared with [`wml_tag!`](crate::wml_tag) gets its struct,
//! `Default` (honoring per-field defaults), and a [`Tag`](super::Tag) impl
//! whose `coerce` runs the [`Coercer`](super::Coercer) over the fields in
//! declaration order and then reports unused input.
//!
//! Field kinds:
//!
//! | keyword       | field type      | matching behavior                       |
//! |---------------|-----------------|-----------------------------------------|
//! | `req`         | `T: Attribute`  | required attribute                      |
//! | `def … = e`   | `T: Attribute`  | attribute, default `e` when absent      |
//! | `opt`         | `Option<T>`     | optional attribute                      |
//! | `tag`         | `T: Tag`        | required child tag                      |
//! | `opt_tag`     | `Option<T>`     | optional child tag                      |
//! | `box_tag`     | `Box<T>`        | required child tag, boxed (recursion)   |
//! | `opt_box_tag` | `Option<Box<T>>`| optional boxed child tag                |
//! | `many`        | `ChildContainer`| greedy container                        |
//!
//! Field declaration order is significant: a greedy container declared
//! before a child tag with an overlapping name will consume the overlap.

/// Declares a WML tag record.
///
/// ```
/// wml_lib::wml_tag! {
///     pub struct Village("village") {
///         req x: i64,
///         req y: i64,
///         def owner: String = String::from("none"),
///     }
/// }
///
/// assert_eq!(<Village as wml_lib::Tag>::tag_name(), "village");
/// ```
#[macro_export]
macro_rules! wml_tag {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($tag:literal) {
            $(
                $(#[$field_meta:meta])*
                $kind:ident $field:ident : $ty:ty $(= $default:expr)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $crate::__wml_field_ty!($kind $ty),
            )+
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field: $crate::__wml_field_default!($kind $ty $(, $default)?),
                    )+
                }
            }
        }

        impl $crate::schema::Tag for $name {
            fn tag_name() -> &'static str {
                $tag
            }

            fn coerce(&mut self, cfg: &[$crate::ast::Node], log: &mut $crate::log::CoerceLog) {
                let mut coercer = $crate::schema::Coercer::new(cfg, log);
                $(
                    $crate::__wml_field_coerce!(
                        coercer, $kind, ::core::stringify!($field), &mut self.$field $(, $default)?
                    );
                )+
                coercer.report_unused();
            }
        }
    };
}

/// Declares a heterogeneous element type: an enum over several tag records,
/// dispatched by body name in declaration order. A variant may carry an
/// alias string used for dispatch instead of the tag's own name.
///
/// ```
/// wml_lib::wml_tag! {
///     pub struct Unit("unit") {
///         def id: String = String::new(),
///     }
/// }
///
/// wml_lib::wml_tag_union! {
///     pub enum SideItem {
///         Unit(Unit),
///         Leader(Unit) = "leader",
///     }
/// }
/// ```
///
/// The matching container is [`TagSeq<SideItem>`](crate::TagSeq).
#[macro_export]
macro_rules! wml_tag_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $variant:ident($ty:ty) $(= $alias:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $variant($ty), )+
        }

        impl $crate::schema::TagUnion for $name {
            fn allows(name: &str) -> bool {
                $(
                    if name == $crate::__wml_union_name!($ty $(, $alias)?) {
                        return true;
                    }
                )+
                false
            }

            fn from_body(
                body: &$crate::ast::Body,
                log: &mut $crate::log::CoerceLog,
            ) -> ::core::option::Option<Self> {
                $(
                    if body.name == $crate::__wml_union_name!($ty $(, $alias)?) {
                        let mut value = <$ty as ::core::default::Default>::default();
                        $crate::schema::Tag::coerce(&mut value, &body.children, log);
                        return ::core::option::Option::Some($name::$variant(value));
                    }
                )+
                ::core::option::Option::None
            }

            fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant(_) => $crate::__wml_union_name!($ty $(, $alias)?), )+
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wml_field_ty {
    (req $ty:ty) => { $ty };
    (def $ty:ty) => { $ty };
    (opt $ty:ty) => { ::core::option::Option<$ty> };
    (tag $ty:ty) => { $ty };
    (opt_tag $ty:ty) => { ::core::option::Option<$ty> };
    (box_tag $ty:ty) => { ::std::boxed::Box<$ty> };
    (opt_box_tag $ty:ty) => { ::core::option::Option<::std::boxed::Box<$ty>> };
    (many $ty:ty) => { $ty };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wml_field_default {
    (req $ty:ty) => { <$ty as ::core::default::Default>::default() };
    (def $ty:ty, $default:expr) => { $default };
    (opt $ty:ty) => { ::core::option::Option::None };
    (tag $ty:ty) => { <$ty as ::core::default::Default>::default() };
    (opt_tag $ty:ty) => { ::core::option::Option::None };
    (box_tag $ty:ty) => { ::std::boxed::Box::new(<$ty as ::core::default::Default>::default()) };
    (opt_box_tag $ty:ty) => { ::core::option::Option::None };
    (many $ty:ty) => { <$ty as ::core::default::Default>::default() };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wml_field_coerce {
    ($c:ident, req, $key:expr, $place:expr) => { $c.attribute($key, $place) };
    ($c:ident, def, $key:expr, $place:expr, $default:expr) => {
        $c.attribute_with_default($key, $place, || $default)
    };
    ($c:ident, opt, $key:expr, $place:expr) => { $c.optional_attribute($key, $place) };
    ($c:ident, tag, $key:expr, $place:expr) => { $c.child($key, $place) };
    ($c:ident, opt_tag, $key:expr, $place:expr) => { $c.optional_child($key, $place) };
    ($c:ident, box_tag, $key:expr, $place:expr) => { $c.boxed_child($key, $place) };
    ($c:ident, opt_box_tag, $key:expr, $place:expr) => { $c.optional_boxed_child($key, $place) };
    ($c:ident, many, $key:expr, $place:expr) => { $c.container($place) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wml_union_name {
    ($ty:ty) => { <$ty as $crate::schema::Tag>::tag_name() };
    ($ty:ty, $alias:literal) => { $alias };
}
