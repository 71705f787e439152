pub mod redis;
pub mod session;

pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
pub use session::{MemorySessionStore, RedisSessionStore, SessionStore};
