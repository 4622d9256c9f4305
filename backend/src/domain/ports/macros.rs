//! Helper macro for port error enums whose variants each carry a message.

/// Generate a `thiserror` enum where every variant holds `message: String`.
///
/// Each variant gets a snake-case constructor accepting `impl Into<String>`,
/// and the enum gets a `message()` accessor returning the raw text.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $prefix:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error("{prefix}: {message}", prefix = $prefix)]
                $variant {
                    /// Adapter-supplied description of the failure.
                    message: String,
                },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a `", stringify!($variant), "` error.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                }
            )*

            /// Adapter-supplied description, without the variant prefix.
            #[must_use]
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message } => message.as_str(), )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ExamplePortError {
            Timeout => "probe timed out",
            BadGateway => "upstream rejected the call",
        }
    }

    #[test]
    fn constructors_accept_str() {
        let err = ExamplePortError::timeout("after 5s");
        assert_eq!(err.to_string(), "probe timed out: after 5s");
        assert_eq!(err.message(), "after 5s");
    }

    #[test]
    fn multi_word_variants_get_snake_case_constructors() {
        let err = ExamplePortError::bad_gateway(String::from("502"));
        assert_eq!(
            err,
            ExamplePortError::BadGateway {
                message: "502".to_owned()
            }
        );
    }
}
