//! 线框图标（24x24，描边随 currentColor）
//!
//! 用法：`<Home attr:class="h-4 w-4" />`

use leptos::prelude::*;

macro_rules! icon {
    ($name:ident, $($d:literal),+ $(,)?) => {
        #[component]
        pub fn $name() -> impl IntoView {
            view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    $(<path d=$d />)+
                </svg>
            }
        }
    };
}

icon!(Home, "M3 10.5 12 3l9 7.5", "M5 9.5V21h14V9.5");
icon!(Play, "M6 4l14 8-14 8z");
icon!(
    HelpCircle,
    "M12 21a9 9 0 1 0 0-18 9 9 0 0 0 0 18z",
    "M9.5 9a2.5 2.5 0 1 1 3.5 2.3c-.6.3-1 .9-1 1.6V14",
    "M12 17h.01",
);
icon!(StickyNote, "M4 4h16v10l-6 6H4z", "M14 20v-6h6");
icon!(UserIcon, "M20 21a8 8 0 0 0-16 0", "M12 13a4 4 0 1 0 0-8 4 4 0 0 0 0 8z");
icon!(Edit, "M12 20h9", "M16.5 3.5a2.1 2.1 0 0 1 3 3L7 19l-4 1 1-4z");
icon!(LogOut, "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9");
icon!(PanelLeft, "M3 3h18v18H3z", "M9 3v18");
icon!(Plus, "M12 5v14", "M5 12h14");
icon!(Trash2, "M3 6h18", "M8 6V4h8v2", "M19 6l-1 14H6L5 6", "M10 11v6", "M14 11v6");
icon!(Search, "M11 19a8 8 0 1 0 0-16 8 8 0 0 0 0 16z", "M21 21l-4.3-4.3");
icon!(
    ExternalLink,
    "M15 3h6v6",
    "M10 14 21 3",
    "M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6",
);
icon!(Check, "M20 6 9 17l-5-5");
icon!(XIcon, "M18 6 6 18", "M6 6l12 12");
icon!(
    Target,
    "M12 21a9 9 0 1 0 0-18 9 9 0 0 0 0 18z",
    "M12 16a4 4 0 1 0 0-8 4 4 0 0 0 0 8z",
    "M12 12h.01",
);
