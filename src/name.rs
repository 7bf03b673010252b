use getset::Getters;

use crate::error::{Error, ErrorKind, Result};
use crate::target::Language;

/// How many `_` suffixes are tried before a reserved identifier is given up on.
const MAX_SUFFIXES: usize = 4;

/// An identifier split into case-independent tokens.
#[derive(Constructor, Clone, Getters, Debug, PartialEq, Eq, Hash)]
#[getset(get = "pub")]
pub struct Name {
    tokens: Vec<String>
}

impl Name {
    /// Tokenizes on `_`, on lower-to-upper transitions, and before the last capital of
    /// an acronym (`HTTPServer` is `HTTP` `Server`).
    pub fn from(name: &str) -> Name {
        let chars: Vec<char> = name.chars().collect();

        let mut names = vec!();
        let mut current_name = String::new();
        for (i, ch) in chars.iter().enumerate() {
            if *ch == '_' {
                if !current_name.is_empty() {
                    names.push(current_name);
                    current_name = String::new();
                }
                continue;
            }

            let last_char_was_lowercase = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let ends_acronym = i > 0 &&
                chars[i - 1].is_uppercase() &&
                ch.is_uppercase() &&
                chars.get(i + 1).map_or(false, |next| next.is_lowercase());

            if (last_char_was_lowercase && ch.is_uppercase()) || ends_acronym {
                if !current_name.is_empty() {
                    names.push(current_name);
                    current_name = String::new();
                }
            }
            current_name.push(*ch);
        }
        if !current_name.is_empty() {
            names.push(current_name)
        }

        return Name { tokens: names };
    }

    pub fn with_prepended(&self, prepended_token: &str) -> Name {
        let mut tokens = vec!(prepended_token.to_string());
        tokens.extend(self.tokens.iter().cloned());
        return Name { tokens };
    }

    pub fn with_appended(&self, appended_token: &str) -> Name {
        let mut tokens = self.tokens.clone();
        tokens.push(appended_token.to_string());
        return Name { tokens };
    }

    pub fn to_fixed_case(&self) -> String {
        self.tokens.join("")
    }

    pub fn to_snake_case(&self) -> String {
        self.tokens.iter()
            .map(|x| x.to_lowercase())
            .collect::<Vec<String>>()
            .join("_")
    }

    pub fn to_screaming_snake_case(&self) -> String {
        self.tokens.iter()
            .map(|x| x.to_uppercase())
            .collect::<Vec<String>>()
            .join("_")
    }

    pub fn to_upper_camel_case(&self) -> String {
        self.tokens
            .iter()
            .map(|x| capitalize(x))
            .collect::<Vec<String>>()
            .join("")
    }

    pub fn to_lower_camel_case(&self) -> String {
        match self.tokens.split_first() {
            Some((head, tail)) => {
                head.to_lowercase() +
                tail.iter()
                    .map(|x| capitalize(x))
                    .collect::<Vec<String>>()
                    .join("")
                    .as_str()
            }
            None => String::new()
        }
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str(),
        None => String::new()
    }
}

/// Appends `_` to `candidate` until it leaves the reserved set.
pub fn avoid_reserved(candidate: String, reserved: &[&str], target: Language) -> Result<String> {
    let mut name = candidate.clone();
    for _ in 0..MAX_SUFFIXES {
        if !reserved.contains(&name.as_str()) {
            return Ok(name);
        }
        name.push('_');
    }

    if reserved.contains(&name.as_str()) {
        return Err(Error::new(ErrorKind::ReservedIdentifierUnresolvable { target, identifier: candidate }));
    }
    Ok(name)
}
