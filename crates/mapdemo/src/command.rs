use std::{error::Error, fmt, str::FromStr};

use overlay::{MapEvent, MapType};
use utility::geo::{Coordinate, Extent};

use crate::controller::{Location, UiCommand};

/// A line read by the demo binary.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ui(UiCommand),
    Map(MapEvent),
    /// Print the view state.
    State,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for ParseCommandError {}

fn number(value: Option<&str>) -> Result<f64, ParseCommandError> {
    let value = value.ok_or_else(|| ParseCommandError("missing number".into()))?;
    value
        .parse()
        .map_err(|_| ParseCommandError(format!("not a number: '{}'", value)))
}

fn coordinate<'a, I>(args: &mut I) -> Result<Coordinate, ParseCommandError>
where
    I: Iterator<Item = &'a str>,
{
    Ok(Coordinate::new(number(args.next())?, number(args.next())?))
}

fn switch(value: Option<&str>) -> Result<bool, ParseCommandError> {
    match value {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        other => Err(ParseCommandError(format!(
            "expected on or off, got {:?}",
            other
        ))),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// One command per line, e.g. `click 49.01 8.40`, `show castle`,
    /// `maptype bingRoad` or `draw on`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut args = line.split_whitespace();
        let Some(keyword) = args.next() else {
            return Err(ParseCommandError("empty line".into()));
        };
        let command = match keyword {
            "quit" | "exit" => Command::Quit,
            "state" => Command::State,
            "init" => Command::Map(MapEvent::Initialized),
            "click" => Command::Map(MapEvent::Clicked(coordinate(&mut args)?)),
            "rightclick" => Command::Map(MapEvent::RightClicked(coordinate(&mut args)?)),
            "move" => Command::Map(MapEvent::PointerMoved(coordinate(&mut args)?)),
            "select" => {
                let corners = [coordinate(&mut args)?, coordinate(&mut args)?];
                let extent = Extent::for_coordinates(corners)
                    .map_err(|why| ParseCommandError(why.to_string()))?;
                Command::Map(MapEvent::ExtentSelected(extent))
            }
            "center" => {
                let location = match args.next() {
                    Some("harbour") => Location::Harbour,
                    Some("castle") => Location::Castle,
                    Some("station") => Location::Station,
                    Some("soccer") => Location::Soccer,
                    Some("all") => return Ok(Command::Ui(UiCommand::ShowAllLocations)),
                    other => {
                        return Err(ParseCommandError(format!(
                            "unknown location {:?}",
                            other
                        )))
                    }
                };
                Command::Ui(UiCommand::ShowLocation(location))
            }
            "zoom" => match args.next() {
                None => Command::Ui(UiCommand::ResetZoom),
                value => Command::Ui(UiCommand::ZoomSlider(number(value)?)),
            },
            "duration" => Command::Ui(UiCommand::AnimationDuration(
                args.next().unwrap_or_default().to_owned(),
            )),
            "bingkey" => Command::Ui(UiCommand::BingMapsApiKey(
                args.next().unwrap_or_default().to_owned(),
            )),
            "maptype" => {
                let name = args.next().unwrap_or_default();
                let map_type = MapType::from_name(name)
                    .ok_or_else(|| ParseCommandError(format!("unknown map type '{}'", name)))?;
                Command::Ui(UiCommand::SelectMapType(map_type))
            }
            "show" | "hide" => {
                let name = args
                    .next()
                    .ok_or_else(|| ParseCommandError("missing toggle name".into()))?;
                Command::Ui(UiCommand::Toggle(name.to_owned(), keyword == "show"))
            }
            "draw" => Command::Ui(UiCommand::DrawPolygon(switch(args.next())?)),
            "constrain" => Command::Ui(UiCommand::Constrain(switch(args.next())?)),
            other => return Err(ParseCommandError(format!("unknown command '{}'", other))),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_map_events() {
        assert_eq!(
            "click 49.0 8.4".parse(),
            Ok(Command::Map(MapEvent::Clicked(Coordinate::new(49.0, 8.4))))
        );
        assert_eq!("init".parse(), Ok(Command::Map(MapEvent::Initialized)));
    }

    #[test]
    fn parses_ui_commands() {
        assert_eq!(
            "show magenta".parse(),
            Ok(Command::Ui(UiCommand::Toggle("magenta".into(), true)))
        );
        assert_eq!(
            "hide click".parse(),
            Ok(Command::Ui(UiCommand::Toggle("click".into(), false)))
        );
        assert_eq!("zoom".parse(), Ok(Command::Ui(UiCommand::ResetZoom)));
        assert_eq!("zoom 9".parse(), Ok(Command::Ui(UiCommand::ZoomSlider(9.0))));
        assert_eq!(
            "duration".parse(),
            Ok(Command::Ui(UiCommand::AnimationDuration(String::new())))
        );
        assert_eq!(
            "maptype wms".parse(),
            Ok(Command::Ui(UiCommand::SelectMapType(MapType::Wms)))
        );
        assert_eq!(
            "center all".parse(),
            Ok(Command::Ui(UiCommand::ShowAllLocations))
        );
        assert_eq!("draw on".parse(), Ok(Command::Ui(UiCommand::DrawPolygon(true))));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!("".parse::<Command>().is_err());
        assert!("click 49.0".parse::<Command>().is_err());
        assert!("click north 8.4".parse::<Command>().is_err());
        assert!("draw maybe".parse::<Command>().is_err());
        assert!("maptype mapquest".parse::<Command>().is_err());
        assert!("teleport".parse::<Command>().is_err());
    }
}
