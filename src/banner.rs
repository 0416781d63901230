//! Startup banner.

use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// Service configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub classifier: &'a str,
    pub model: &'a str,
    pub address: &'a str,
}

/// Render the banner. Split from printing so it can be tested.
pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║              B A B E L                ║
   ║    one tongue in, its name out        ║
   ╚═══════════════════════════════════════╝

   version     {}
   by          {}
   home        {}
   repo        {}
   classifier  {} ({})
   listen      http://{}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.classifier,
        info.model,
        info.address,
    )
}

/// Print the startup banner with service info.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}
