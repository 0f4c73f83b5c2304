use leptos::ev::{Event, SubmitEvent};
use leptos::*;
use web_sys::{File, HtmlInputElement};

use crate::models::business::{Business, BusinessProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Phone,
    Address,
    Description,
    Website,
    ReviewLink,
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
}

impl Field {
    const ALL: [Field; 10] = [
        Field::Name,
        Field::Phone,
        Field::Address,
        Field::Description,
        Field::Website,
        Field::ReviewLink,
        Field::Facebook,
        Field::Instagram,
        Field::Twitter,
        Field::Linkedin,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Name => "Business Name *",
            Field::Phone => "Phone Number",
            Field::Address => "Address",
            Field::Description => "Description",
            Field::Website => "Website",
            Field::ReviewLink => "Google Review Link",
            Field::Facebook => "Facebook",
            Field::Instagram => "Instagram",
            Field::Twitter => "Twitter",
            Field::Linkedin => "LinkedIn",
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            Field::Name | Field::Address | Field::Description => "text",
            Field::Phone => "tel",
            _ => "url",
        }
    }

    fn value(self, profile: &BusinessProfile) -> &str {
        match self {
            Field::Name => &profile.business_name,
            Field::Phone => &profile.phone_number,
            Field::Address => &profile.address,
            Field::Description => &profile.description,
            Field::Website => &profile.website_url,
            Field::ReviewLink => &profile.google_review_url,
            Field::Facebook => &profile.facebook_url,
            Field::Instagram => &profile.instagram_url,
            Field::Twitter => &profile.twitter_url,
            Field::Linkedin => &profile.linkedin_url,
        }
    }

    fn slot(self, profile: &mut BusinessProfile) -> &mut String {
        match self {
            Field::Name => &mut profile.business_name,
            Field::Phone => &mut profile.phone_number,
            Field::Address => &mut profile.address,
            Field::Description => &mut profile.description,
            Field::Website => &mut profile.website_url,
            Field::ReviewLink => &mut profile.google_review_url,
            Field::Facebook => &mut profile.facebook_url,
            Field::Instagram => &mut profile.instagram_url,
            Field::Twitter => &mut profile.twitter_url,
            Field::Linkedin => &mut profile.linkedin_url,
        }
    }
}

fn field_input(field: Field, profile: RwSignal<BusinessProfile>) -> impl IntoView {
    let value = move || profile.with(|p| field.value(p).to_string());
    let on_input = move |ev: Event| {
        let text = event_target_value(&ev);
        profile.update(|p| *field.slot(p) = text);
    };
    let input = if field == Field::Description {
        view! { <textarea rows=4 prop:value=value on:input=on_input></textarea> }.into_view()
    } else {
        view! { <input type=field.input_type() prop:value=value on:input=on_input /> }.into_view()
    };
    view! {
        <div class="form-group">
            <label>{field.label()}</label>
            {input}
        </div>
    }
}

/// Create or edit a listing. The parent performs the request and reports `busy`.
#[component]
pub fn BusinessForm(
    #[prop(optional)] business: Option<Business>,
    on_submit: Callback<(BusinessProfile, Option<File>)>,
    on_cancel: Callback<()>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let editing = business.is_some();
    let profile = create_rw_signal(business.as_ref().map(BusinessProfile::from).unwrap_or_default());
    let image = create_rw_signal(None::<File>);
    let error_text = create_rw_signal(None::<String>);

    let on_file = move |ev: Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        image.set(input.files().and_then(|files| files.get(0)));
    };

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = profile.get_untracked();
        if let Err(message) = current.validate() {
            error_text.set(Some(message));
            return;
        }
        error_text.set(None);
        on_submit.call((current, image.get_untracked()));
    };

    view! {
        <form class="business-form" on:submit=submit>
            <h2>{if editing { "Edit Business" } else { "Add New Business" }}</h2>
            {move || error_text.get().map(|text| view! { <div class="notice notice-error">{text}</div> })}
            {Field::ALL.into_iter().map(|field| field_input(field, profile)).collect_view()}
            <div class="form-group">
                <label>{ "Business Image" }</label>
                <input type="file" accept="image/*" on:change=on_file />
                {move || image.with(|f| f.as_ref().map(|f| view! { <p class="muted">{f.name()}</p> }))}
            </div>
            <div class="button-row">
                <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.call(())>
                    { "Cancel" }
                </button>
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    {move || match (busy.get(), editing) {
                        (true, _) => "Saving...",
                        (false, true) => "Update Business",
                        (false, false) => "Create Business",
                    }}
                </button>
            </div>
        </form>
    }
}
