//! Helper macro for declaring port error enums.
//!
//! Every variant carries a `message: String` and gets a snake_case
//! constructor accepting anything convertible into `String`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a `", stringify!($variant), "` error.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Adapter-supplied detail carried by every variant.
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message } => message.as_str(), )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
