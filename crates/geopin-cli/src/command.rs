//! Parsing of session input lines.

use geopin_core::models::{Mode, ProjectedPoint};

/// One line of session input
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    SetMode(Mode),
    /// Click at geographic coordinates (latitude, longitude)
    Click { latitude: f64, longitude: f64 },
    /// Click at projected surface coordinates
    ClickProjected(ProjectedPoint),
    Name(String),
    Type(String),
    Radius(String),
    Confirm,
    Dismiss,
    Pins,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  mode <add|nearby|nearest|distance>   switch workflow
  click <lat> <lon>                    click the map at a coordinate
  click-xy <x> <y>                     click at Web Mercator meters
  name <text> / type <text>            fill in a new place
  radius <value>                       fill in the search radius
  confirm                              submit the form
  dismiss                              close the result
  pins | status | help | quit";

impl SessionCommand {
    /// Parse a line. Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "mode" => SessionCommand::SetMode(rest.parse().map_err(|e| format!("{}", e))?),
            "click" => {
                let (latitude, longitude) = parse_pair(rest, "click <lat> <lon>")?;
                SessionCommand::Click { latitude, longitude }
            }
            "click-xy" => {
                let (x, y) = parse_pair(rest, "click-xy <x> <y>")?;
                SessionCommand::ClickProjected(ProjectedPoint::new(x, y))
            }
            "name" => SessionCommand::Name(rest.to_string()),
            "type" => SessionCommand::Type(rest.to_string()),
            "radius" => SessionCommand::Radius(rest.to_string()),
            "confirm" => SessionCommand::Confirm,
            "dismiss" | "close" => SessionCommand::Dismiss,
            "pins" => SessionCommand::Pins,
            "status" => SessionCommand::Status,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(format!("Unknown command '{}'. Type 'help' for a list", other)),
        };
        Ok(Some(command))
    }
}

fn parse_pair(rest: &str, usage: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    match parts.as_slice() {
        [a, b] => {
            let a = a.parse::<f64>().map_err(|_| format!("'{}' is not a number", a))?;
            let b = b.parse::<f64>().map_err(|_| format!("'{}' is not a number", b))?;
            Ok((a, b))
        }
        _ => Err(format!("Usage: {}", usage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        assert_eq!(
            SessionCommand::parse("click 20.30 85.82").unwrap(),
            Some(SessionCommand::Click { latitude: 20.30, longitude: 85.82 })
        );
        assert_eq!(
            SessionCommand::parse("click 20.30, 85.82").unwrap(),
            Some(SessionCommand::Click { latitude: 20.30, longitude: 85.82 })
        );
        assert!(SessionCommand::parse("click 20.30").is_err());
        assert!(SessionCommand::parse("click north east").is_err());
    }

    #[test]
    fn test_parse_text_fields_keep_spaces() {
        assert_eq!(
            SessionCommand::parse("name  Blue Door Cafe ").unwrap(),
            Some(SessionCommand::Name("Blue Door Cafe".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("radius").unwrap(),
            Some(SessionCommand::Radius(String::new()))
        );
    }

    #[test]
    fn test_parse_mode_and_misc() {
        assert_eq!(
            SessionCommand::parse("mode Distance").unwrap(),
            Some(SessionCommand::SetMode(Mode::Distance))
        );
        assert!(SessionCommand::parse("mode teleport").is_err());
        assert_eq!(SessionCommand::parse("   ").unwrap(), None);
        assert_eq!(SessionCommand::parse("exit").unwrap(), Some(SessionCommand::Quit));
        assert!(SessionCommand::parse("fly").is_err());
    }

    #[test]
    fn test_parse_projected_click() {
        assert_eq!(
            SessionCommand::parse("click-xy 9553731.5 2307700.0").unwrap(),
            Some(SessionCommand::ClickProjected(ProjectedPoint::new(9553731.5, 2307700.0)))
        );
    }
}
