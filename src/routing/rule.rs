use std::fmt;

/// 복합 규칙에서 원자 규칙을 구분하는 구분자
pub const RULE_SEPARATOR: &str = "&&";

/// `Matcher:argument` 형태의 단일 매칭 규칙
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomicRule {
    text: String,
}

impl AtomicRule {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn matcher(&self) -> &str {
        self.text
            .split_once(':')
            .map(|(matcher, _)| matcher)
            .unwrap_or(&self.text)
    }

    pub fn argument(&self) -> Option<&str> {
        self.text.split_once(':').map(|(_, argument)| argument)
    }

    /// URL에 안전한 규칙 이름 (`Path:/test` → `Path-test`)
    pub fn name(&self) -> String {
        slugify(&self.text)
    }
}

impl fmt::Display for AtomicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// `&&`로 연결된 원자 규칙의 순서 있는 목록
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundRule {
    rules: Vec<AtomicRule>,
}

impl CompoundRule {
    /// 규칙 표현식을 분해합니다. 각 조각은 앞뒤 공백이 제거되며 빈 조각은 버립니다.
    pub fn parse(expression: &str) -> Self {
        let rules = expression
            .split(RULE_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(AtomicRule::new)
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[AtomicRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 원자 규칙별 이름 목록 (분해 순서 유지)
    pub fn names(&self) -> Vec<String> {
        self.rules.iter().map(AtomicRule::name).collect()
    }

    /// 원자 규칙 원문 목록
    pub fn texts(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.text.clone()).collect()
    }

    /// 복합 규칙 전체를 대표하는 이름
    pub fn name(&self) -> String {
        self.names().join("-")
    }
}

impl fmt::Display for CompoundRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texts = self.texts();
        f.write_str(&texts.join(RULE_SEPARATOR))
    }
}

/// 문자/숫자가 아닌 문자 구간을 하나의 `-`로 바꾸고 앞뒤 `-`를 제거합니다.
/// 유니코드 문자와 숫자는 그대로 유지됩니다.
pub fn slugify(value: &str) -> String {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
