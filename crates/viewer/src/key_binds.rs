use crate::message::Message;
use cosmic::{
    iced::keyboard::{Key, Modifiers, key::Named},
    widget::menu::key_bind::{KeyBind, Modifier},
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Open,
    Quit,
    Next,
    Prev,
}

impl MenuAction {
    pub fn message(self) -> Message {
        match self {
            MenuAction::Open => Message::OpenFileDialog,
            MenuAction::Quit => Message::Quit,
            MenuAction::Next => Message::Next,
            MenuAction::Prev => Message::Prev,
        }
    }
}

pub fn init_key_binds() -> HashMap<KeyBind, MenuAction> {
    let mut binds = HashMap::new();

    binds.insert(
        KeyBind {
            modifiers: vec![Modifier::Ctrl],
            key: Key::Character("o".into()),
        },
        MenuAction::Open,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![Modifier::Ctrl],
            key: Key::Character("q".into()),
        },
        MenuAction::Quit,
    );

    // Navigation
    for (named, action) in [
        (Named::ArrowRight, MenuAction::Next),
        (Named::PageDown, MenuAction::Next),
        (Named::ArrowLeft, MenuAction::Prev),
        (Named::PageUp, MenuAction::Prev),
    ] {
        binds.insert(
            KeyBind {
                modifiers: vec![],
                key: Key::Named(named),
            },
            action,
        );
    }

    binds
}

pub fn key_press_handler(key: Key, modifiers: Modifiers) -> Option<Message> {
    let mut mods = Vec::new();

    if modifiers.control() {
        mods.push(Modifier::Ctrl);
    }

    if modifiers.shift() {
        mods.push(Modifier::Shift);
    }

    if modifiers.alt() {
        mods.push(Modifier::Alt);
    }

    if modifiers.logo() {
        mods.push(Modifier::Super);
    }

    let key_bind = KeyBind {
        modifiers: mods,
        key,
    };

    init_key_binds()
        .get(&key_bind)
        .map(|action| Message::KeyBind(*action))
}
