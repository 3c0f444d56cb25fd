#[cfg(test)]
mod tests {
    use templproc::prompt::{DialoguerPrompter, Prompter};

    #[test]
    fn test_skip_prompt_confirms() {
        let prompter = DialoguerPrompter::new();
        assert!(prompter.confirm(true, "Clean up 3 partially created files?".to_string()).unwrap());
    }

    #[test]
    #[ignore = "Requires interactive input"]
    fn test_confirm_defaults_to_no() {
        let prompter = DialoguerPrompter::new();
        let prompt = "Clean up 3 partially created files?".to_string();
        assert!(!prompter.confirm(false, prompt).unwrap());
    }
}
