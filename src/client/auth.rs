use base64::Engine;

/// Credentials sent with every request to the node inventory
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// API key sent as `Authorization: ApiKey <key>`
    Apikey(String),
    /// Username and password sent via Basic Auth headers
    Basic(String, String),
    /// Bearer token sent as `Authorization: Bearer <token>`
    Bearer(String),
    /// Don't use any authentication
    None,
}

impl Auth {
    /// Pick credentials from `{prefix}_APIKEY`, `{prefix}_USERNAME` and
    /// `{prefix}_PASSWORD`, or `{prefix}_TOKEN`, in that order.
    pub fn from_env(prefix: &str) -> Self {
        let var = |name: &str| std::env::var(format!("{prefix}_{name}")).ok();
        if let Some(apikey) = var("APIKEY") {
            Self::Apikey(apikey)
        } else if let (Some(username), Some(password)) = (var("USERNAME"), var("PASSWORD")) {
            Self::Basic(username, password)
        } else if let Some(token) = var("TOKEN") {
            Self::Bearer(token)
        } else {
            Self::None
        }
    }

    /// Value for the `Authorization` header, if any
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Apikey(apikey) => Some(format!("ApiKey {}", apikey)),
            Self::Basic(username, password) => {
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                Some(format!("Basic {}", credentials))
            }
            Self::Bearer(token) => Some(format!("Bearer {}", token)),
            Self::None => None,
        }
    }
}

impl std::fmt::Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apikey(_) => write!(f, "Apikey"),
            Self::Basic(_, _) => write!(f, "Basic"),
            Self::Bearer(_) => write!(f, "Bearer"),
            Self::None => write!(f, "None"),
        }
    }
}

// Never print secrets
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Auth::{}", self)
    }
}
