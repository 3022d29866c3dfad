//! Version ordering as used by Maven-style repositories.
//!
//! A version is split into numeric and qualifier items. `.` separates items,
//! `-` and digit/letter transitions open a nested list. Trailing zero or empty
//! items are dropped, so `1.0.0`, `1.0` and `1` compare equal.

use std::cmp::Ordering;
use std::fmt;

const QUALIFIERS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

/// Position of the empty qualifier in [`QUALIFIERS`].
const RELEASE_INDEX: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Int(u128),
    Str(String),
    List(Vec<Item>),
}

impl Item {
    fn is_null(&self) -> bool {
        match self {
            Item::Int(n) => *n == 0,
            Item::Str(s) => qualifier_rank(s) == qualifier_rank(""),
            Item::List(items) => items.is_empty(),
        }
    }

    fn string(value: &str, followed_by_digit: bool) -> Self {
        let mut value = value.to_string();
        if followed_by_digit && value.len() == 1 {
            value = match value.as_str() {
                "a" => "alpha".to_string(),
                "b" => "beta".to_string(),
                "m" => "milestone".to_string(),
                _ => value,
            };
        }
        let value = match value.as_str() {
            "ga" | "final" | "release" => String::new(),
            "cr" => "rc".to_string(),
            _ => value,
        };
        Item::Str(value)
    }

    fn parse(is_digit: bool, token: &str) -> Self {
        if is_digit {
            let trimmed = token.trim_start_matches('0');
            match trimmed.parse::<u128>() {
                Ok(n) => Item::Int(n),
                Err(_) if trimmed.is_empty() => Item::Int(0),
                // Longer than u128: keep the digits as a qualifier-free ordinal.
                Err(_) => Item::Int(u128::MAX),
            }
        } else {
            Item::string(token, false)
        }
    }

    /// Compare against another item, `None` standing for a missing item.
    fn compare(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Int(n), None) => {
                if *n == 0 {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Item::Int(a), Some(Item::Int(b))) => a.cmp(b),
            (Item::Int(_), Some(_)) => Ordering::Greater,

            (Item::Str(s), None) => qualifier_rank(s).cmp(&qualifier_rank("")),
            (Item::Str(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::Str(a), Some(Item::Str(b))) => qualifier_rank(a).cmp(&qualifier_rank(b)),
            (Item::Str(_), Some(Item::List(_))) => Ordering::Less,

            (Item::List(items), None) => {
                for item in items {
                    let result = item.compare(None);
                    if result != Ordering::Equal {
                        return result;
                    }
                }
                Ordering::Equal
            }
            (Item::List(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::List(_), Some(Item::Str(_))) => Ordering::Greater,
            (Item::List(left), Some(Item::List(right))) => compare_lists(left, right),
        }
    }
}

fn compare_lists(left: &[Item], right: &[Item]) -> Ordering {
    let len = left.len().max(right.len());
    for i in 0..len {
        let result = match (left.get(i), right.get(i)) {
            (Some(l), r) => l.compare(r),
            (None, Some(r)) => r.compare(None).reverse(),
            (None, None) => Ordering::Equal,
        };
        if result != Ordering::Equal {
            return result;
        }
    }
    Ordering::Equal
}

/// Sortable key for a qualifier: known qualifiers by position, unknown ones
/// after all of them in lexical order.
fn qualifier_rank(qualifier: &str) -> String {
    match QUALIFIERS.iter().position(|q| *q == qualifier) {
        Some(index) => index.to_string(),
        None => format!("{}-{}", QUALIFIERS.len(), qualifier),
    }
}

fn normalize(items: &mut Vec<Item>) {
    for item in items.iter_mut() {
        if let Item::List(inner) = item {
            normalize(inner);
        }
    }
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if items[i].is_null() {
            items.remove(i);
        } else if !matches!(items[i], Item::List(_)) {
            break;
        }
    }
}

/// A parsed, totally ordered artifact version.
#[derive(Debug, Clone)]
pub struct ComparableVersion {
    value: String,
    items: Vec<Item>,
}

impl ComparableVersion {
    pub fn parse(version: &str) -> Self {
        let lowered = version.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();

        // Each nested list is stored as a path of indexes into its parent.
        let mut root: Vec<Item> = Vec::new();
        let mut path: Vec<usize> = Vec::new();
        let mut is_digit = false;
        let mut start = 0;

        fn current<'a>(root: &'a mut Vec<Item>, path: &[usize]) -> &'a mut Vec<Item> {
            let mut list = root;
            for &index in path {
                list = match &mut list[index] {
                    Item::List(inner) => inner,
                    _ => unreachable!("list path always points at a list item"),
                };
            }
            list
        }

        fn open_list(root: &mut Vec<Item>, path: &mut Vec<usize>) {
            let list = current(root, path);
            list.push(Item::List(Vec::new()));
            let index = list.len() - 1;
            path.push(index);
        }

        let token = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

        for (i, &c) in chars.iter().enumerate() {
            match c {
                '.' => {
                    let list = current(&mut root, &path);
                    if i == start {
                        list.push(Item::Int(0));
                    } else {
                        list.push(Item::parse(is_digit, &token(start, i)));
                    }
                    start = i + 1;
                }
                '-' => {
                    let list = current(&mut root, &path);
                    if i == start {
                        list.push(Item::Int(0));
                    } else {
                        list.push(Item::parse(is_digit, &token(start, i)));
                    }
                    start = i + 1;
                    open_list(&mut root, &mut path);
                }
                c if c.is_ascii_digit() => {
                    if !is_digit && i > start {
                        current(&mut root, &path).push(Item::string(&token(start, i), true));
                        start = i;
                        open_list(&mut root, &mut path);
                    }
                    is_digit = true;
                }
                _ => {
                    if is_digit && i > start {
                        current(&mut root, &path).push(Item::parse(true, &token(start, i)));
                        start = i;
                        open_list(&mut root, &mut path);
                    }
                    is_digit = false;
                }
            }
        }

        if chars.len() > start {
            current(&mut root, &path).push(Item::parse(is_digit, &token(start, chars.len())));
        }

        normalize(&mut root);

        Self {
            value: version.to_string(),
            items: root,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq for ComparableVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableVersion {}

impl PartialOrd for ComparableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComparableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }
}

impl From<&str> for ComparableVersion {
    fn from(version: &str) -> Self {
        Self::parse(version)
    }
}
