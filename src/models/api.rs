use serde::Deserialize;

/// Cuerpo de éxito: { data: T, message? } o T directamente
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped {
        data: T,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        match self {
            Envelope::Wrapped { data, .. } => data,
            Envelope::Bare(data) => data,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Wrapped { message, .. } => message.as_deref(),
            Envelope::Bare(_) => None,
        }
    }
}
