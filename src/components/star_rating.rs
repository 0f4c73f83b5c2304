use leptos::*;

const STAR_PATH: &str = "M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z";

/// Average formatted for display next to read-only stars.
pub fn format_average(average: f64) -> String {
    if average <= 0.0 {
        "No ratings".to_string()
    } else {
        format!("{average:.1}")
    }
}

/// Five stars. Interactive when `on_change` is given, read-only otherwise.
///
/// While interactive, hovering previews a rating without committing it.
#[component]
pub fn StarRating(
    #[prop(into)] rating: MaybeSignal<f64>,
    #[prop(optional)] on_change: Option<Callback<u8>>,
    #[prop(default = 20)] size: u32,
    #[prop(optional)] show_value: bool,
) -> impl IntoView {
    let read_only = on_change.is_none();
    let (hover, set_hover) = create_signal(0u8);
    let shown = move || match hover.get() {
        0 => rating.get(),
        preview => f64::from(preview),
    };

    let stars = (1..=5u8)
        .map(|star| {
            let filled = move || f64::from(star) <= shown();
            view! {
                <button
                    type="button"
                    class="star"
                    class:star-interactive=!read_only
                    disabled=read_only
                    aria-label=format!("{star} star")
                    on:click=move |_| {
                        if let Some(cb) = on_change {
                            cb.call(star);
                        }
                    }
                    on:mouseenter=move |_| {
                        if !read_only {
                            set_hover.set(star);
                        }
                    }
                    on:mouseleave=move |_| set_hover.set(0)
                >
                    <svg
                        width=size
                        height=size
                        viewBox="0 0 24 24"
                        fill=move || if filled() { "#FCD34D" } else { "#E5E7EB" }
                    >
                        <path d=STAR_PATH />
                    </svg>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="star-rating">
            {stars}
            {(read_only && show_value).then(|| view! {
                <span class="star-rating-value">{move || format_average(rating.get())}</span>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(0.0), "No ratings");
        assert_eq!(format_average(4.0), "4.0");
        assert_eq!(format_average(3.456), "3.5");
    }
}
