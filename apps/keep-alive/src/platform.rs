//! Process cosmetics.

/// Sets the console window title so the process is recognizable in Task
/// Manager. Failures are ignored.
#[cfg(windows)]
pub fn set_console_title(title: &str) {
    use windows_sys::Win32::System::Console::SetConsoleTitleW;

    let wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
    // SAFETY: `wide` is NUL-terminated and outlives the call.
    if unsafe { SetConsoleTitleW(wide.as_ptr()) } == 0 {
        tracing::debug!("could not set console title");
    }
}

#[cfg(not(windows))]
pub fn set_console_title(_title: &str) {}
