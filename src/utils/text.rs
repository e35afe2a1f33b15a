/// 头像缩写：单个词取前两个字符，多个词取首尾词的首字母
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("Ana Maria Lopez"), "AL");
        assert_eq!(initials("ben"), "BE");
        assert_eq!(initials("x@school.org"), "X@");
        assert_eq!(initials("  "), "");
    }
}
