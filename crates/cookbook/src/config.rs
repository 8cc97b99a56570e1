use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deadline for `GET /recipe/{id}` in milliseconds (default: 1000)
    pub get_recipe_timeout_ms: u64,
    /// Deadline for `POST /recipe` in milliseconds (default: 1000)
    pub create_recipe_timeout_ms: u64,
    /// Deadline for `PUT /recipe/{id}` in milliseconds (default: 1000)
    pub update_recipe_timeout_ms: u64,
    /// Deadline for `DELETE /recipe/{id}` in milliseconds (default: 1000)
    pub delete_recipe_timeout_ms: u64,
    /// DynamoDB table holding recipes (default: "cookbook")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub dynamodb_table_name: String,
    /// Endpoint override for local DynamoDB. Unset means the AWS default.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_region: String,
    /// Service name label attached to stats (default: "cookbook")
    pub service_name: String,
    /// Deployment environment label (default: "dev")
    pub environment: String,
    /// Host label (default: "127.0.0.1")
    pub host_ip: String,
    /// How long in-flight requests may drain on shutdown (default: 60)
    pub shutdown_timeout_secs: u64,
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GET_RECIPE_TIMEOUT_MS`, `CREATE_RECIPE_TIMEOUT_MS`,
    ///   `UPDATE_RECIPE_TIMEOUT_MS`, `DELETE_RECIPE_TIMEOUT_MS` (default: 1000)
    /// - `DYNAMODB_TABLE_NAME` - DynamoDB table (default: "cookbook")
    /// - `AWS_ENDPOINT_URL` - DynamoDB endpoint override (default: unset)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `SERVICE_NAME`, `ENV`, `HOST_IP` - stats labels
    /// - `SHUTDOWN_TIMEOUT_SECS` - graceful shutdown drain (default: 60)
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            get_recipe_timeout_ms: parse_or("GET_RECIPE_TIMEOUT_MS", 1_000),
            create_recipe_timeout_ms: parse_or("CREATE_RECIPE_TIMEOUT_MS", 1_000),
            update_recipe_timeout_ms: parse_or("UPDATE_RECIPE_TIMEOUT_MS", 1_000),
            delete_recipe_timeout_ms: parse_or("DELETE_RECIPE_TIMEOUT_MS", 1_000),
            dynamodb_table_name: string_or("DYNAMODB_TABLE_NAME", "cookbook"),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL").ok().filter(|v| !v.is_empty()),
            aws_region: string_or("AWS_REGION", "us-east-1"),
            service_name: string_or("SERVICE_NAME", "cookbook"),
            environment: string_or("ENV", "dev"),
            host_ip: string_or("HOST_IP", "127.0.0.1"),
            shutdown_timeout_secs: parse_or("SHUTDOWN_TIMEOUT_SECS", 60),
        }
    }

    pub fn get_recipe_timeout(&self) -> Duration {
        Duration::from_millis(self.get_recipe_timeout_ms)
    }

    pub fn create_recipe_timeout(&self) -> Duration {
        Duration::from_millis(self.create_recipe_timeout_ms)
    }

    pub fn update_recipe_timeout(&self) -> Duration {
        Duration::from_millis(self.update_recipe_timeout_ms)
    }

    pub fn delete_recipe_timeout(&self) -> Duration {
        Duration::from_millis(self.delete_recipe_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for tests, independent of the environment.
    pub fn for_tests() -> Self {
        Self {
            get_recipe_timeout_ms: 1_000,
            create_recipe_timeout_ms: 1_000,
            update_recipe_timeout_ms: 1_000,
            delete_recipe_timeout_ms: 1_000,
            dynamodb_table_name: "cookbook".to_string(),
            aws_endpoint_url: None,
            aws_region: "us-east-1".to_string(),
            service_name: "cookbook".to_string(),
            environment: "test".to_string(),
            host_ip: "127.0.0.1".to_string(),
            shutdown_timeout_secs: 5,
        }
    }
}
