// db错误
// 13xxx
pub const FETCH_FAILED: u32 = 13001;

// request错误
// 20xxx
pub const VALIDATION_ERROR: u32 = 20001;
pub const QUERY_REJECTION: u32 = 20002;
