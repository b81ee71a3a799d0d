//! Button events and filters

/// Input subsystem key codes reported by the button driver
pub mod code {
    pub const BTN_A: u16 = 0x130;
    pub const BTN_B: u16 = 0x131;
    pub const BTN_DPAD_UP: u16 = 0x220;
    pub const BTN_DPAD_DOWN: u16 = 0x221;
    pub const BTN_DPAD_LEFT: u16 = 0x222;
    pub const BTN_DPAD_RIGHT: u16 = 0x223;
}

/// Logical buttons on the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
}

impl Button {
    /// All buttons, in filter bit order
    pub const ALL: [Button; 6] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
    ];

    /// Map an input subsystem key code to a button
    pub fn from_input_code(code: u16) -> Option<Self> {
        match code {
            code::BTN_DPAD_UP => Some(Button::Up),
            code::BTN_DPAD_DOWN => Some(Button::Down),
            code::BTN_DPAD_LEFT => Some(Button::Left),
            code::BTN_DPAD_RIGHT => Some(Button::Right),
            code::BTN_A => Some(Button::A),
            code::BTN_B => Some(Button::B),
            _ => None,
        }
    }

    /// Uppercase letter naming the button
    pub const fn letter(self) -> char {
        match self {
            Button::Up => 'U',
            Button::Down => 'D',
            Button::Left => 'L',
            Button::Right => 'R',
            Button::A => 'A',
            Button::B => 'B',
        }
    }

    const fn index(self) -> u16 {
        self as u16
    }
}

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// A single button edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub edge: Edge,
}

impl ButtonEvent {
    pub const fn pressed(button: Button) -> Self {
        Self {
            button,
            edge: Edge::Pressed,
        }
    }

    pub const fn released(button: Button) -> Self {
        Self {
            button,
            edge: Edge::Released,
        }
    }

    pub const fn is_press(&self) -> bool {
        matches!(self.edge, Edge::Pressed)
    }

    /// Letter key: uppercase for a press, lowercase for a release
    pub const fn letter(&self) -> char {
        let upper = self.button.letter();
        match self.edge {
            Edge::Pressed => upper,
            Edge::Released => upper.to_ascii_lowercase(),
        }
    }

    /// Parse a letter key (`'A'` = A pressed, `'a'` = A released)
    pub fn from_letter(letter: char) -> Option<Self> {
        let button = match letter.to_ascii_uppercase() {
            'U' => Button::Up,
            'D' => Button::Down,
            'L' => Button::Left,
            'R' => Button::Right,
            'A' => Button::A,
            'B' => Button::B,
            _ => return None,
        };
        if letter.is_ascii_uppercase() {
            Some(Self::pressed(button))
        } else {
            Some(Self::released(button))
        }
    }

    const fn bit(&self) -> u16 {
        let offset = match self.edge {
            Edge::Pressed => 0,
            Edge::Released => 6,
        };
        1 << (self.button.index() + offset)
    }
}

/// Set of button events a read is willing to accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonFilter(u16);

impl ButtonFilter {
    /// Accept nothing; reads with this filter just wait
    pub const NONE: Self = Self(0);

    /// Any press or release of any button
    pub const ALL: Self = Self(0x0FFF);

    /// Any press
    pub const fn presses() -> Self {
        Self(0x003F)
    }

    /// Any release
    pub const fn releases() -> Self {
        Self(0x0FC0)
    }

    /// Filter from letter keys, e.g. `"ABab"`; other characters are ignored
    pub fn from_letters(letters: &str) -> Self {
        letters
            .chars()
            .filter_map(ButtonEvent::from_letter)
            .fold(Self::NONE, Self::with)
    }

    /// Add one event to the filter
    pub const fn with(self, event: ButtonEvent) -> Self {
        Self(self.0 | event.bit())
    }

    /// Add both edges of a button
    pub const fn with_button(self, button: Button) -> Self {
        self.with(ButtonEvent::pressed(button))
            .with(ButtonEvent::released(button))
    }

    pub const fn contains(&self, event: ButtonEvent) -> bool {
        self.0 & event.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<ButtonEvent> for ButtonFilter {
    fn from(event: ButtonEvent) -> Self {
        Self::NONE.with(event)
    }
}
