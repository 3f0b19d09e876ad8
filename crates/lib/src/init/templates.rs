//! File templates written by `gopherino init`.

/// Blink skeleton for `src/main.go`.
pub const MAIN_GO: &str = r#"package main

import "arduino"

func setup() {
	arduino.PinMode(arduino.LED_BUILTIN, arduino.OUTPUT)
}

func loop() {
	arduino.DigitalWrite(arduino.LED_BUILTIN, arduino.HIGH)
	arduino.Delay(1000)
	arduino.DigitalWrite(arduino.LED_BUILTIN, arduino.LOW)
	arduino.Delay(1000)
}
"#;

/// Keeps build output and firmware images out of version control.
pub const GITIGNORE: &str = "build/\n*.hex\n*.bin\n*.uf2\n";
