/// Declares a closed set of record statuses. Each variant is written
/// and displayed as its label, and the set is listed in declaration
/// order through [`Status::ALL`](crate::record::Status::ALL).
macro_rules! statuses {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $crate::record::Status for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $($name::$variant => $label,)+
                })
            }
        }
    };
}
