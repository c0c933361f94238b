/// Creates an enum whose variants are backed by strings, like a numeric enum just with string
/// values. Every value also carries a human readable name.
///
/// ```ignore
/// enum_values! {
///     pub enum Locale {
///         de_DE = "de-DE" => "German"
///     }
/// }
/// ```
///
/// Values AniWatch delivers which aren't known (yet) end up in the generated `Custom(String)`
/// variant instead of failing deserialization. The enum gets [`std::fmt::Display`] (the raw
/// value), [`Default`] (`Custom("")`), `From<String>` / `From<&str>`, serde support and the
/// `all` / `human_readable` helpers.
macro_rules! enum_values {
    ($(#[$attribute:meta])* $v:vis enum $name:ident { $($field:ident = $value:literal => $human:literal)* }) => {
        $(
            #[$attribute]
        )*
        #[derive(Clone, Debug, Eq, PartialEq)]
        $v enum $name {
            $(
                $field,
            )*
            Custom(String)
        }

        impl $name {
            /// All known values, without `Custom`.
            pub fn all() -> Vec<$name> {
                vec![$($name::$field),*]
            }

            /// Human readable name. `Custom` values return their raw value.
            pub fn human_readable(&self) -> &str {
                match self {
                    $(
                        $name::$field => $human,
                    )*
                    $name::Custom(raw) => raw.as_str()
                }
            }

            fn raw(&self) -> &str {
                match self {
                    $(
                        $name::$field => $value,
                    )*
                    $name::Custom(raw) => raw.as_str()
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.raw())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::Custom("".to_string())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $(
                        $value => $name::$field,
                    )*
                    _ => $name::Custom(value.to_string())
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::from(value.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                Ok(Self::from(<String as serde::Deserialize>::deserialize(deserializer)?))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.raw())
            }
        }
    };
}

pub(crate) use enum_values;
