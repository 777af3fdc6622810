use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct OnsenImage {
    pub image_id: String,
    pub image_url: String,
}

impl OnsenImage {
    /// URL absoluta: las rutas relativas cuelgan del origen de la API
    pub fn resolved_url(&self, api_url: &str) -> String {
        if self.image_url.starts_with("http://") || self.image_url.starts_with("https://") {
            return self.image_url.clone();
        }
        let origin = match api_url.find("://") {
            Some(scheme_end) => {
                let host_start = scheme_end + 3;
                match api_url[host_start..].find('/') {
                    Some(path_start) => &api_url[..host_start + path_start],
                    None => api_url,
                }
            }
            None => "",
        };
        format!("{}/{}", origin, self.image_url.trim_start_matches('/'))
    }
}

/// Archivo seleccionado por el usuario, ya leído en memoria
#[derive(Clone, PartialEq, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
