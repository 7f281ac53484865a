use crate::Symbol;

fn prefix_function<S: Symbol>(seq: &[S]) -> Vec<usize> {
    let mut pi = vec![0; seq.len()];
    let mut k = 0;
    for i in 1..seq.len() {
        while k > 0 && seq[i] != seq[k] {
            k = pi[k - 1];
        }
        if seq[i] == seq[k] {
            k += 1;
        }
        pi[i] = k;
    }
    pi
}

/// Knuth-Morris-Pratt scan used as an independent single-pattern reference.
pub fn prefix_function_positions<S: Symbol>(text: &[S], pattern: &[S]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    let pi = prefix_function(pattern);
    let mut positions = Vec::new();
    let mut k = 0;
    for (i, &symbol) in text.iter().enumerate() {
        while k > 0 && (k == pattern.len() || symbol != pattern[k]) {
            k = pi[k - 1];
        }
        if symbol == pattern[k] {
            k += 1;
        }
        if k == pattern.len() {
            positions.push(i + 1 - k);
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use crate::test_utils::prefix::{prefix_function, prefix_function_positions};

    #[test]
    fn test_prefix_function() {
        assert_eq!(prefix_function(b"abacaba"), [0, 0, 1, 0, 1, 2, 3]);
        assert_eq!(prefix_function_positions(b"abababa", b"aba"), [0, 2, 4]);
        assert!(prefix_function_positions(b"ab", b"abc").is_empty());
    }
}
