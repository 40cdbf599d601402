//! Locally executable actions.
//!
//! A handful of actions can be answered on the relay itself; everything
//! else must run on the requesting device, so the model's own reply
//! stands. A returned override replaces the intent's reply field.

use chrono::Local;

use smith_common::intent::Action;

/// Resolve an action locally. `None` means "no override".
pub fn execute_action(action: Action, target: &str) -> Option<String> {
    match action {
        Action::Time => {
            let now = Local::now();
            Some(format!(
                "The current time is {} on {}",
                now.format("%I:%M %p"),
                now.format("%A, %B %d, %Y")
            ))
        }
        Action::Date => Some(format!("Today is {}", Local::now().format("%A, %B %d, %Y"))),
        Action::Weather => {
            Some("I'd need access to a weather service to get the current weather.".to_string())
        }
        Action::Search => Some(format!(
            "I would search for '{target}' but I need your phone to execute the browser opening."
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_override() {
        let reply = execute_action(Action::Time, "").unwrap();
        assert!(reply.starts_with("The current time is "));
        assert!(reply.contains(" on "));
    }

    #[test]
    fn test_date_override() {
        let reply = execute_action(Action::Date, "").unwrap();
        assert!(reply.starts_with("Today is "));
    }

    #[test]
    fn test_weather_disclaimer() {
        assert_eq!(
            execute_action(Action::Weather, "").unwrap(),
            "I'd need access to a weather service to get the current weather."
        );
    }

    #[test]
    fn test_search_references_target() {
        let reply = execute_action(Action::Search, "pizza places").unwrap();
        assert!(reply.contains("'pizza places'"));
    }

    #[test]
    fn test_device_actions_not_overridden() {
        for action in [
            Action::Call,
            Action::Sms,
            Action::OpenApp,
            Action::MobileData,
            Action::Hotspot,
            Action::Wifi,
            Action::Bluetooth,
            Action::Settings,
            Action::None,
        ] {
            assert_eq!(execute_action(action, "anything"), None);
        }
    }
}
