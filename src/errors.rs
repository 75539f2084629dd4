//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_taskline_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TaskLineError {
            $($variant(String),)*
        }

        impl TaskLineError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TaskLineError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TaskLineError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TaskLineError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TaskLineError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TaskLineError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_taskline_errors! {
    StoreRead("E001", "Store Read Error"),
    StoreWrite("E002", "Store Write Error"),
    FileOperation("E003", "File Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Serialization("E006", "Serialization Error"),
    StoragePluginNotFound("E007", "Storage Plugin Not Found"),
    DateParse("E008", "Date Parse Error"),
    ReviewGate("E009", "Review Gate Error"),
}

impl TaskLineError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TaskLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TaskLineError {}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for TaskLineError {
    fn from(err: std::io::Error) -> Self {
        TaskLineError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TaskLineError {
    fn from(err: serde_json::Error) -> Self {
        TaskLineError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TaskLineError {
    fn from(err: chrono::ParseError) -> Self {
        TaskLineError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskLineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TaskLineError::store_read("test").code(), "E001");
        assert_eq!(TaskLineError::validation("test").code(), "E004");
        assert_eq!(TaskLineError::not_found("test").code(), "E005");
        assert_eq!(TaskLineError::review_gate("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            TaskLineError::store_read("test").error_type(),
            "Store Read Error"
        );
        assert_eq!(
            TaskLineError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = TaskLineError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = TaskLineError::validation("Invalid team");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid team"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TaskLineError = io_err.into();
        assert_eq!(err.code(), "E003");
    }
}
