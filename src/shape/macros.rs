//! The `record!` macro

/// Declares an immutable record with required and defaultable fields.
///
/// ```
/// use record_shape::{record, REQUIRED};
///
/// record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Sample {
///         a: i64,
///         b?: i64,
///         c?: i64,
///         d: Option<i64>,
///     }
/// }
///
/// let factory = Sample::factory(SampleDefaults { a: REQUIRED, b: 45, c: 17, d: REQUIRED });
///
/// let first = factory.create(SampleInput::new(1, Some(2)));
/// assert_eq!((*first.a(), *first.b(), *first.c(), *first.d()), (1, 45, 17, Some(2)));
///
/// let second = factory.create(SampleInput::new(1, Some(2)).b(6).c(3));
/// let reset = second.without_b();
/// assert_eq!((*reset.a(), *reset.b(), *reset.c(), *reset.d()), (1, 45, 3, Some(2)));
/// ```
///
/// For `struct Name { ... }` the macro generates:
///
/// - `Name`: the instance. Fields are private and read through `name()`
///   getters. `with_name(value)` and `update_name(f)` return a new instance
///   for every field; `without_name()` resets a field to its default and
///   exists only for defaultable fields. `Clone` is always derived; any
///   other derive on the declaration is applied as written.
/// - `NameDefaults`: the defaults specification. Required fields take
///   [`REQUIRED`](crate::REQUIRED); defaultable fields take a concrete value.
/// - `NameInput`: the constructor input. `NameInput::new` takes every
///   required field in declaration order; defaultable fields are set with
///   same-named builder methods or left `None`.
/// - `Name::factory(defaults)` and an implementation of [`Shape`](crate::Shape).
///
/// Field attributes (typically doc comments) are copied onto the getter and
/// the input field.
///
/// Limits:
///
/// - No generic parameters, lifetimes or `where` clauses on the struct.
/// - No visibility on fields: instance fields are always private, while
///   `NameDefaults` and `NameInput` fields are always `pub`.
/// - A field may not be named `factory` or `defaults`, since those names
///   are taken by generated methods. A field named `new` collides with
///   `NameInput::new` when it is defaultable.
/// - Every defaultable field type must be `Clone`, and so must every
///   required field type, because the instance derives `Clone`.
///
/// Required fields cannot be reset:
///
/// ```compile_fail
/// use record_shape::{record, REQUIRED};
///
/// record! { struct Sample { a: i64, b?: i64 } }
///
/// let factory = Sample::factory(SampleDefaults { a: REQUIRED, b: 45 });
/// let record = factory.create(SampleInput::new(1));
/// let _ = record.without_a();
/// ```
///
/// Required fields cannot be left out of the input:
///
/// ```compile_fail
/// use record_shape::{record, REQUIRED};
///
/// record! { struct Sample { a: i64, b?: i64 } }
///
/// let factory = Sample::factory(SampleDefaults { a: REQUIRED, b: 45 });
/// let _ = factory.create(SampleInput { b: Some(1) });
/// ```
///
/// An absent value is not a default:
///
/// ```compile_fail
/// use record_shape::{record, REQUIRED};
///
/// record! { struct Sample { a: i64, b?: i64 } }
///
/// let _ = Sample::factory(SampleDefaults { a: REQUIRED, b: None });
/// ```
///
/// And a required field has no default to give:
///
/// ```compile_fail
/// use record_shape::record;
///
/// record! { struct Sample { a: i64, b?: i64 } }
///
/// let _ = Sample::factory(SampleDefaults { a: 0, b: 45 });
/// ```
#[macro_export]
macro_rules! record {
    // `name?: Type`
    (@munch
        head [$($head:tt)*]
        req [$($req:tt)*]
        opt [$($opt:tt)*]
        all [$($all:tt)*]
        rest [$(#[$fmeta:meta])* $field:ident ? : $ty:ty $(, $($tail:tt)*)?]
    ) => {
        $crate::record!(@munch
            head [$($head)*]
            req [$($req)*]
            opt [$($opt)* { [$(#[$fmeta])*] $field : $ty }]
            all [$($all)* ($field, Defaultable)]
            rest [$($($tail)*)?]
        );
    };

    // `name: Type`
    (@munch
        head [$($head:tt)*]
        req [$($req:tt)*]
        opt [$($opt:tt)*]
        all [$($all:tt)*]
        rest [$(#[$fmeta:meta])* $field:ident : $ty:ty $(, $($tail:tt)*)?]
    ) => {
        $crate::record!(@munch
            head [$($head)*]
            req [$($req)* { [$(#[$fmeta])*] $field : $ty }]
            opt [$($opt)*]
            all [$($all)* ($field, Required)]
            rest [$($($tail)*)?]
        );
    };

    (@munch
        head [$(#[$meta:meta])* $vis:vis struct $name:ident]
        req [$({ [$(#[$rmeta:meta])*] $rf:ident : $rt:ty })*]
        opt [$({ [$(#[$ometa:meta])*] $of:ident : $ot:ty })*]
        all [$(($af:ident, $ak:ident))*]
        rest []
    ) => {
        $crate::paste::paste! {
            $(#[$meta])*
            #[derive(Clone)]
            $vis struct $name {
                $( $rf: $rt, )*
                $( $of: $ot, )*
                __defaults: $crate::DefaultsRef<[<$name Defaults>]>,
            }

            #[doc = "Defaults specification for [`" $name "`]."]
            $vis struct [<$name Defaults>] {
                $( pub $rf: $crate::Required, )*
                $( pub $of: $ot, )*
            }

            #[doc = "Constructor input for [`" $name "`]. Defaultable fields left `None` take their default."]
            $vis struct [<$name Input>] {
                $( $(#[$rmeta])* pub $rf: $rt, )*
                $( $(#[$ometa])* pub $of: ::core::option::Option<$ot>, )*
            }

            impl [<$name Input>] {
                /// Input with every required field supplied and no override.
                #[allow(clippy::new_without_default, clippy::too_many_arguments)]
                pub fn new($($rf: $rt),*) -> Self {
                    Self {
                        $( $rf, )*
                        $( $of: ::core::option::Option::None, )*
                    }
                }

                $(
                    #[doc = "Overrides the default of `" $of "`."]
                    pub fn $of(mut self, value: $ot) -> Self {
                        self.$of = ::core::option::Option::Some(value);
                        self
                    }
                )*
            }

            impl $name {
                /// Builds a factory around a defaults specification.
                pub fn factory(defaults: [<$name Defaults>]) -> $crate::Factory<Self> {
                    $crate::Factory::new(defaults)
                }

                /// The defaults specification backing this instance.
                pub fn defaults(&self) -> &[<$name Defaults>] {
                    self.__defaults.get()
                }

                $(
                    $(#[$rmeta])*
                    pub fn $rf(&self) -> &$rt {
                        &self.$rf
                    }

                    #[doc = "Returns a new instance with `" $rf "` set to `value`."]
                    #[must_use]
                    pub fn [<with_ $rf>](&self, value: $rt) -> Self {
                        let mut next = self.clone();
                        next.$rf = value;
                        next
                    }

                    #[doc = "Returns a new instance with `" $rf "` replaced by `f(current)`."]
                    #[must_use]
                    pub fn [<update_ $rf>]<F>(&self, f: F) -> Self
                    where
                        F: FnOnce(&$rt) -> $rt,
                    {
                        let value = f(&self.$rf);
                        self.[<with_ $rf>](value)
                    }
                )*

                $(
                    $(#[$ometa])*
                    pub fn $of(&self) -> &$ot {
                        &self.$of
                    }

                    #[doc = "Returns a new instance with `" $of "` set to `value`."]
                    #[must_use]
                    pub fn [<with_ $of>](&self, value: $ot) -> Self {
                        let mut next = self.clone();
                        next.$of = value;
                        next
                    }

                    #[doc = "Returns a new instance with `" $of "` replaced by `f(current)`."]
                    #[must_use]
                    pub fn [<update_ $of>]<F>(&self, f: F) -> Self
                    where
                        F: FnOnce(&$ot) -> $ot,
                    {
                        let value = f(&self.$of);
                        self.[<with_ $of>](value)
                    }

                    #[doc = "Returns a new instance with `" $of "` reset to its default."]
                    #[must_use]
                    pub fn [<without_ $of>](&self) -> Self {
                        let mut next = self.clone();
                        next.$of = self.__defaults.get().$of.clone();
                        next
                    }
                )*
            }

            impl $crate::Shape for $name {
                type Input = [<$name Input>];
                type Defaults = [<$name Defaults>];

                const NAME: &'static str = stringify!($name);
                const FIELDS: &'static [$crate::FieldSpec] = &[
                    $( $crate::FieldSpec::new(stringify!($af), $crate::FieldKind::$ak), )*
                ];

                fn assemble(
                    input: Self::Input,
                    defaults: $crate::DefaultsRef<Self::Defaults>,
                ) -> Self {
                    Self {
                        $( $rf: input.$rf, )*
                        $(
                            $of: match input.$of {
                                ::core::option::Option::Some(value) => value,
                                ::core::option::Option::None => defaults.get().$of.clone(),
                            },
                        )*
                        __defaults: defaults,
                    }
                }
            }
        }
    };

    (@munch
        head [$($head:tt)*]
        req [$($req:tt)*]
        opt [$($opt:tt)*]
        all [$($all:tt)*]
        rest [$($bad:tt)+]
    ) => {
        compile_error!(concat!(
            "record!: expected `name: Type` or `name?: Type`, found `",
            stringify!($($bad)+),
            "`"
        ));
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::record!(@munch
            head [$(#[$meta])* $vis struct $name]
            req []
            opt []
            all []
            rest [$($body)*]
        );
    };
}
