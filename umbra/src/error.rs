/// Reasons a [`crate::BufferDescriptor`] can be rejected for.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum DenoiserError {
    #[error("name of the `{role}` buffer is empty")]
    EmptyName { role: &'static str },

    #[error("buffer `{name}` is bound both as `{first}` and `{second}`")]
    DuplicateName {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("output buffer `{name}` is also bound as `{role}`")]
    OutputAliasesInput { name: String, role: &'static str },
}
