/// The identity a request acts under. Supplied by the external
/// authentication provider (signed-in users) or derived from a guest
/// device id; services take it as an explicit parameter on every call
/// rather than reading ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub email: Option<String>,
    pub is_anonymous: bool,
    pub admin: bool,
}

impl Session {
    pub fn guest(device_id: &str) -> Self {
        Session {
            uid: device_id.to_string(),
            email: None,
            is_anonymous: true,
            admin: false,
        }
    }

    /// An anonymous identity is treated the same as no session at all
    /// for anything that requires a real signed-in user.
    pub fn is_authenticated(&self) -> bool {
        !self.is_anonymous
    }

    /// Key carts and wishlists are stored under for this session.
    pub fn cart_owner(&self) -> &str {
        &self.uid
    }
}
