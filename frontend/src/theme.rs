use stylist::css;
use stylist::yew::Global;
use yew::prelude::*;

pub const INK: &str = "#262626";
pub const MUTED: &str = "#8c8c8c";
pub const PRIMARY: &str = "#1890ff";
pub const TWITTER: &str = "#1DA1F2";
pub const SURFACE: &str = "#f5f5f5";
pub const BORDER: &str = "#d9d9d9";

/// Page-wide stylesheet: typography, cards, skeletons, split-text glyphs and
/// the roster grid breakpoints.
#[function_component(GlobalStyles)]
pub fn global_styles() -> Html {
    html! {
        <Global css={css!(
            r#"
            html, body {
                margin: 0;
                padding: 0;
                color: ${ink};
                font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Noto Sans TC", sans-serif;
                -webkit-font-smoothing: antialiased;
            }

            #smooth-content {
                overflow: visible;
                width: 100%;
            }

            .split-char, .split-word {
                display: inline-block;
                will-change: transform, opacity;
                backface-visibility: hidden;
            }

            .hero .title {
                font-size: clamp(2.5rem, 8vw, 5.5rem);
                font-weight: 800;
                margin: 0;
                color: white;
            }

            .hero .special-text {
                margin-left: 0.25em;
                background: linear-gradient(90deg, #a5d8ff, #ffffff, #a5d8ff);
                -webkit-background-clip: text;
                background-clip: text;
                color: transparent;
            }

            .hero .subtitle {
                font-size: clamp(1.1rem, 3vw, 1.8rem);
                letter-spacing: 0.2em;
                margin-top: 16px;
            }

            .section-title {
                text-align: center;
                font-weight: 700;
                margin: 0 0 16px;
            }

            .card {
                display: block;
                background: white;
                border: 1px solid #f0f0f0;
                border-radius: 8px;
                padding: 24px;
                transform: translateZ(0);
                will-change: transform;
                transition: box-shadow 0.3s ease;
            }

            .card:hover {
                box-shadow: 0 1px 2px -2px rgba(0,0,0,0.16), 0 3px 6px 0 rgba(0,0,0,0.12), 0 5px 12px 4px rgba(0,0,0,0.09);
            }

            .credit-link {
                display: block;
                text-decoration: none;
                color: inherit;
            }

            .credit-meta {
                display: flex;
                align-items: center;
                gap: 16px;
            }

            .credit-name {
                font-weight: 600;
                font-size: 16px;
            }

            .credit-role {
                color: ${muted};
            }

            .credit-handle {
                margin-top: 16px;
                text-align: center;
                color: ${twitter};
            }

            .avatar {
                border-radius: 50%;
                object-fit: cover;
                flex-shrink: 0;
                background: ${surface};
            }

            .roster-row {
                display: grid;
                grid-template-columns: 1fr 1fr;
                gap: 48px;
                align-items: center;
                margin-bottom: 80px;
            }

            .roster-stack {
                display: flex;
                flex-direction: column;
                gap: 24px;
            }

            .sponsor-grid {
                display: grid;
                grid-template-columns: 1fr 1fr;
                gap: 24px;
            }

            .skeleton {
                background: linear-gradient(90deg, #f0f0f0 25%, #e6e6e6 37%, #f0f0f0 63%);
                background-size: 400% 100%;
                animation: skeleton-shimmer 1.4s ease infinite;
            }

            .skeleton-image {
                width: 100%;
                height: 300px;
                border-radius: 8px;
            }

            @keyframes skeleton-shimmer {
                0% { background-position: 100% 50%; }
                100% { background-position: 0 50%; }
            }

            .image-failed {
                display: flex;
                align-items: center;
                justify-content: center;
                min-height: 200px;
                background-color: ${surface};
                color: #999;
            }

            .timeline-item .card {
                box-shadow: 0 3px 6px -4px rgba(0,0,0,0.12), 0 6px 16px 0 rgba(0,0,0,0.08), 0 9px 28px 8px rgba(0,0,0,0.05);
            }

            @media (max-width: 767px) {
                .roster-row, .sponsor-grid {
                    grid-template-columns: 1fr;
                    gap: 24px;
                    margin-bottom: 48px;
                }

                .roster-row .roster-image {
                    order: 2;
                }
            }
            "#,
            ink = INK,
            muted = MUTED,
            twitter = TWITTER,
            surface = SURFACE,
        )} />
    }
}
