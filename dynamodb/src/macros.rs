/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

/// Declare a structure shape: a plain struct of optional members plus its builder module.
///
/// Members serialize with their PascalCase wire names; absent members are omitted from the
/// request body and missing members deserialize as `None`.
macro_rules! shape {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $builder_mod:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "PascalCase")]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            /// Creates a new builder-style object to manufacture this type
            pub fn builder() -> $builder_mod::Builder {
                $builder_mod::Builder::default()
            }
        }

        #[doc = concat!("See [`", stringify!($name), "`]")]
        pub mod $builder_mod {
            #[allow(unused_imports)]
            use super::*;

            #[doc = concat!("A builder for [`", stringify!($name), "`]")]
            #[non_exhaustive]
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct Builder {
                $( $field: Option<$ty>, )*
            }

            impl Builder {
                $(
                    pub fn $field(mut self, input: impl Into<$ty>) -> Self {
                        self.$field = Some(input.into());
                        self
                    }
                )*

                #[doc = concat!("Consumes the builder and constructs a [`", stringify!($name), "`]")]
                pub fn build(self) -> super::$name {
                    super::$name {
                        $( $field: self.$field, )*
                    }
                }
            }
        }
    };
}

/// Declare a string enum: known values plus an `Unknown` catch-all so that newer service
/// values still deserialize.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $value:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[non_exhaustive]
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum $name {
            $( $variant, )*
            /// A value that this version of the client does not recognize
            Unknown(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $value, )*
                    $name::Unknown(value) => value.as_str(),
                }
            }

            /// Every value known to this version of the client
            pub fn values() -> &'static [&'static str] {
                &[$( $value ),*]
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(s: &'a str) -> Self {
                match s {
                    $( $value => $name::$variant, )*
                    other => $name::Unknown(other.to_owned()),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::from(s))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok($name::from(value.as_str()))
            }
        }
    };
}
