use crate::app::App;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let session = app.session();
    mpris.set_track_metadata(Some(session.current_index()), Some(session.current_track()));
    mpris.set_playback(session.is_playing());
    mpris.set_position(session.elapsed());
}
