//! Single-line text editing with a char-indexed cursor.

fn char_byte_pos(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn insert(s: &mut String, cursor: &mut usize, c: char) {
    let bp = char_byte_pos(s, *cursor);
    s.insert(bp, c);
    *cursor += 1;
}

pub fn backspace(s: &mut String, cursor: &mut usize) {
    if *cursor > 0 {
        *cursor -= 1;
        let bp = char_byte_pos(s, *cursor);
        s.remove(bp);
    }
}

pub fn delete(s: &mut String, cursor: &mut usize) {
    if *cursor < s.chars().count() {
        let bp = char_byte_pos(s, *cursor);
        s.remove(bp);
    }
}

pub fn move_left(cursor: &mut usize) {
    *cursor = cursor.saturating_sub(1);
}

pub fn move_right(s: &str, cursor: &mut usize) {
    if *cursor < s.chars().count() {
        *cursor += 1;
    }
}

pub fn split_at_char_pos(s: &str, pos: usize) -> (&str, &str) {
    s.split_at(char_byte_pos(s, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_in_the_middle_of_multibyte_text() {
        let mut s = "aç".to_string();
        let mut cursor = 1;
        insert(&mut s, &mut cursor, 'ã');
        assert_eq!(s, "aãç");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn backspace_and_delete_stop_at_the_edges() {
        let mut s = "ab".to_string();
        let mut cursor = 0;
        backspace(&mut s, &mut cursor);
        assert_eq!((s.as_str(), cursor), ("ab", 0));

        cursor = 2;
        delete(&mut s, &mut cursor);
        assert_eq!((s.as_str(), cursor), ("ab", 2));

        backspace(&mut s, &mut cursor);
        assert_eq!((s.as_str(), cursor), ("a", 1));
    }

    #[test]
    fn cursor_moves_within_bounds() {
        let mut cursor = 0;
        move_left(&mut cursor);
        assert_eq!(cursor, 0);
        move_right("é", &mut cursor);
        move_right("é", &mut cursor);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn split_uses_char_positions() {
        assert_eq!(split_at_char_pos("ação", 2), ("aç", "ão"));
        assert_eq!(split_at_char_pos("ab", 9), ("ab", ""));
    }
}
