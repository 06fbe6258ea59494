/// Session tokens live for 30 minutes; logout revokes them earlier.
pub const SESSION_TTL_SECONDS: i64 = 30 * 60;

pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "FIXPAY__AUTH__JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "FIXPAY__POSTGRES__URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "FIXPAY__REDIS__HOST_NAME";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "FIXPAY__EMAIL_CLIENT__AUTH_TOKEN";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";

    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@fixpay.app";
        pub const TIMEOUT: Duration = std::time::Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
