//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuCheck as Check, LuClipboard as Copy, LuExternalLink as ExternalLink, LuEye as Eye,
        LuEyeOff as EyeOff, LuGithub as GitHub, LuImagePlus as AddImage, LuLogOut as Logout,
        LuMoon as Moon, LuSave as Save, LuSun as Sun, LuTrash2 as Clear, LuUpload as Upload,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsBoxArrowRight as Logout, BsBoxArrowUpRight as ExternalLink, BsCheckLg as Check,
        BsClipboard as Copy, BsCloudUpload as Upload, BsEye as Eye, BsEyeSlash as EyeOff,
        BsSave as Save, BsGithub as GitHub, BsImages as AddImage, BsMoonFill as Moon,
        BsSunFill as Sun, BsTrash as Clear, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(ADD_IMAGE, AddImage);
themed_icon!(CHECK, Check);
themed_icon!(CLEAR, Clear);
themed_icon!(CLOSE, Close);
themed_icon!(COPY, Copy);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(EYE, Eye);
themed_icon!(EYE_OFF, EyeOff);
themed_icon!(GITHUB, GitHub);
themed_icon!(LOGOUT, Logout);
themed_icon!(MOON, Moon);
themed_icon!(SAVE, Save);
themed_icon!(SUN, Sun);
themed_icon!(UPLOAD, Upload);
