/// Declares the keyword enum together with its source spelling.
macro_rules! keywords {
    ($($variant:ident => $text:literal),+ $(,)?) => {
        /// A recognized TSPL command keyword.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum Command {
            $($variant),+
        }

        impl Command {
            /// Every recognized keyword, in declaration order.
            pub const ALL: &'static [Command] = &[$(Command::$variant),+];

            /// Canonical uppercase spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Command::$variant => $text),+
                }
            }

            /// Look up an already-uppercased keyword.
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                match keyword {
                    $($text => Some(Command::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    Size => "SIZE",
    Gap => "GAP",
    Direction => "DIRECTION",
    Reference => "REFERENCE",
    Cls => "CLS",
    Text => "TEXT",
    Barcode => "BARCODE",
    Qrcode => "QRCODE",
    Box => "BOX",
    Bar => "BAR",
    Print => "PRINT",
    Density => "DENSITY",
    Speed => "SPEED",
    Set => "SET",
    Shift => "SHIFT",
    Offset => "OFFSET",
    Bitmap => "BITMAP",
    Reverse => "REVERSE",
    Formfeed => "FORMFEED",
    Backfeed => "BACKFEED",
    Home => "HOME",
    Sound => "SOUND",
    Limitfeed => "LIMITFEED",
    Selftest => "SELFTEST",
    Eop => "EOP",
    Block => "BLOCK",
    Codepage => "CODEPAGE",
    Country => "COUNTRY",
    Putbmp => "PUTBMP",
    Putpcx => "PUTPCX",
    Download => "DOWNLOAD",
    Erase => "ERASE",
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
