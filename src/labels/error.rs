use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// 요청한 라벨 키가 존재하지 않음
    NotFound {
        keys: Vec<String>,
    },
}

impl LabelError {
    pub fn not_found(key: impl Into<String>) -> Self {
        LabelError::NotFound { keys: vec![key.into()] }
    }

    pub fn missing_keys(&self) -> &[String] {
        match self {
            LabelError::NotFound { keys } => keys,
        }
    }
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::NotFound { keys } =>
                write!(f, "라벨을 찾을 수 없음: {}", keys.join(", ")),
        }
    }
}

impl std::error::Error for LabelError {}
