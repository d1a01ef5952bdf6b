//! 笔记：列表、搜索、新增/编辑弹窗和删除
//!
//! 每次修改成功后重新拉取列表，不做本地合并。

use crate::auth::use_auth;
use crate::components::icons::{Edit, ExternalLink, Plus, Search, Trash2};
use crate::components::loading::LoadingSpinner;
use crate::notify::use_notifier;
use crate::web::confirm;
use goalpad_shared::notes::{NoteDraft, filter_notes};
use goalpad_shared::{Id, Note};
use leptos::prelude::*;
use leptos::task::spawn_local;

const STICKY_COLORS: [&str; 5] = [
    "bg-yellow-100",
    "bg-pink-100",
    "bg-sky-100",
    "bg-lime-100",
    "bg-orange-100",
];

/// 编辑弹窗的状态：新建或编辑某条笔记
#[derive(Debug, Clone, Copy, PartialEq)]
enum Editing {
    New,
    Existing(Id),
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (notes, set_notes) = signal(Vec::<Note>::new());
    let (loading, set_loading) = signal(true);
    let (search, set_search) = signal(String::new());
    let editing = RwSignal::new(Option::<Editing>::None);
    let draft = RwSignal::new(NoteDraft::default());

    let load = move || {
        let api = auth.api();
        spawn_local(async move {
            match auth.check("list notes", api.list_notes().await) {
                Ok(list) => set_notes.set(list),
                Err(e) => notifier.api_error("Failed to load notes", &e),
            }
            set_loading.set(false);
        });
    };
    load();

    let visible = Memo::new(move |_| {
        notes.with(|all| {
            search.with(|term| filter_notes(all, term).into_iter().cloned().collect::<Vec<_>>())
        })
    });

    let open_new = move |_| {
        draft.set(NoteDraft::default());
        editing.set(Some(Editing::New));
    };

    let open_edit = move |note: Note| {
        draft.set(NoteDraft::from_note(&note));
        editing.set(Some(Editing::Existing(note.id)));
    };

    let on_delete = move |id: Id| {
        if !confirm("Are you sure you want to delete this note?") {
            return;
        }
        let api = auth.api();
        spawn_local(async move {
            match auth.check("delete note", api.delete_note(id).await) {
                Ok(_) => {
                    notifier.success("Note deleted successfully!");
                    load();
                }
                Err(e) => notifier.api_error("Failed to delete note", &e),
            }
        });
    };

    let on_save = Callback::new(move |_: ()| {
        let Some(mode) = editing.get_untracked() else {
            return;
        };
        let current = draft.get_untracked();
        let api = auth.api();

        match mode {
            Editing::New => {
                let req = match current.to_create() {
                    Ok(req) => req,
                    Err(e) => return notifier.api_error("Invalid note", &e),
                };
                spawn_local(async move {
                    match auth.check("create note", api.create_note(&req).await) {
                        Ok(_) => {
                            notifier.success("Note added successfully!");
                            editing.set(None);
                            load();
                        }
                        Err(e) => notifier.api_error("Failed to add note", &e),
                    }
                });
            }
            Editing::Existing(id) => {
                let update = match current.to_update() {
                    Ok(update) => update,
                    Err(e) => return notifier.api_error("Invalid note", &e),
                };
                spawn_local(async move {
                    match auth.check("update note", api.update_note(id, update).await) {
                        Ok(_) => {
                            notifier.success("Note updated successfully!");
                            editing.set(None);
                            load();
                        }
                        Err(e) => notifier.api_error("Failed to update note", &e),
                    }
                });
            }
        }
    });

    view! {
        <div class="space-y-4">
            <div class="flex flex-col sm:flex-row gap-3 sm:items-center justify-between">
                <label class="input input-bordered flex items-center gap-2 sm:w-80">
                    <Search attr:class="h-4 w-4 opacity-60" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search notes..."
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        prop:value=search
                    />
                </label>
                <button class="btn btn-primary" on:click=open_new>
                    <Plus attr:class="h-4 w-4" />
                    "Add Note"
                </button>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner label="Loading notes…" /> }>
                <Show
                    when=move || !visible.with(Vec::is_empty)
                    fallback=move || view! {
                        <div class="text-center py-16 text-base-content/60">
                            {move || if search.with(String::is_empty) {
                                "No notes yet. Capture your first idea!"
                            } else {
                                "No notes match your search."
                            }}
                        </div>
                    }
                >
                    <div class="grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-3 gap-4">
                        <For
                            each=move || visible.get().into_iter().enumerate()
                            key=|(_, note)| (note.id, note.title.clone(), note.content.clone())
                            children=move |(index, note)| {
                                let color = STICKY_COLORS[index % STICKY_COLORS.len()];
                                let id = note.id;
                                let edit_note = note.clone();
                                view! {
                                    <NoteCard
                                        note=note
                                        color=color
                                        on_edit=Callback::new(move |_| open_edit(edit_note.clone()))
                                        on_delete=Callback::new(move |_| on_delete(id))
                                    />
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <Show when=move || editing.with(Option::is_some)>
                <NoteEditor
                    draft=draft
                    title=Signal::derive(move || match editing.get() {
                        Some(Editing::Existing(_)) => "Edit Note",
                        _ => "Add New Note",
                    })
                    on_save=on_save
                    on_cancel=Callback::new(move |_| editing.set(None))
                />
            </Show>
        </div>
    }
}

#[component]
fn NoteCard(
    note: Note,
    color: &'static str,
    on_edit: Callback<()>,
    on_delete: Callback<()>,
) -> impl IntoView {
    let source = note.source.clone().filter(|s| !s.is_empty());
    let link = note.source_url.clone().filter(|s| !s.is_empty());

    view! {
        <div class=format!("rounded-lg shadow p-4 text-neutral flex flex-col gap-2 {}", color)>
            <div class="flex items-start justify-between gap-2">
                <h3 class="font-semibold break-words">{note.title.clone()}</h3>
                <div class="flex gap-1 shrink-0">
                    <button class="btn btn-ghost btn-xs" title="Edit" on:click=move |_| on_edit.run(())>
                        <Edit attr:class="h-3 w-3" />
                    </button>
                    <button class="btn btn-ghost btn-xs text-error" title="Delete" on:click=move |_| on_delete.run(())>
                        <Trash2 attr:class="h-3 w-3" />
                    </button>
                </div>
            </div>
            <p class="text-sm whitespace-pre-wrap break-words flex-1">{note.content.clone()}</p>
            {(source.is_some() || link.is_some()).then(|| view! {
                <div class="flex items-center gap-2 text-xs opacity-70">
                    {source.map(|s| view! { <span class="badge badge-ghost badge-sm">{s}</span> })}
                    {link.map(|url| view! {
                        <a href=url target="_blank" rel="noopener noreferrer" class="link inline-flex items-center gap-1">
                            "Source" <ExternalLink attr:class="h-3 w-3" />
                        </a>
                    })}
                </div>
            })}
        </div>
    }
}

#[component]
fn NoteEditor(
    draft: RwSignal<NoteDraft>,
    title: Signal<&'static str>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_save.run(());
    };

    view! {
        <div class="modal modal-open" role="dialog">
            <div class="modal-box">
                <h3 class="font-bold text-lg mb-3">{move || title.get()}</h3>
                <form class="space-y-3" on:submit=on_submit>
                    <input
                        type="text"
                        class="input input-bordered w-full"
                        placeholder="Title"
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                    <textarea
                        class="textarea textarea-bordered w-full h-32"
                        placeholder="Write your note..."
                        prop:value=move || draft.with(|d| d.content.clone())
                        on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                    ></textarea>
                    <div class="grid grid-cols-2 gap-2">
                        <input
                            type="text"
                            class="input input-bordered input-sm"
                            placeholder="Source (optional)"
                            prop:value=move || draft.with(|d| d.source.clone())
                            on:input=move |ev| draft.update(|d| d.source = event_target_value(&ev))
                        />
                        <input
                            type="url"
                            class="input input-bordered input-sm"
                            placeholder="Source URL (optional)"
                            prop:value=move || draft.with(|d| d.source_url.clone())
                            on:input=move |ev| draft.update(|d| d.source_url = event_target_value(&ev))
                        />
                    </div>
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">"Save"</button>
                    </div>
                </form>
            </div>
            <div class="modal-backdrop" on:click=move |_| on_cancel.run(())></div>
        </div>
    }
}
