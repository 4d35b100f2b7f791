pub(super) const ENTRIES: &[(&str, &str)] = &[
    ("auth.email", "Email"),
    ("auth.errors.email", "Veuillez entrer un e-mail valide"),
    ("auth.errors.invalid_token", "Token invalide"),
    (
        "auth.errors.password_match",
        "Les mots de passe ne correspondent pas",
    ),
    (
        "auth.errors.password_strength",
        "Le mot de passe doit contenir au moins 8 caractères, une lettre majuscule, une lettre minuscule, un chiffre et un caractère spécial.",
    ),
    ("auth.log_in.button", "Se connecter"),
    ("auth.log_in.header", "Se connecter"),
    (
        "auth.log_in.subheader",
        "Entrez vos identifiants pour vous connecter",
    ),
    ("auth.log_out", "Se déconnecter"),
    ("auth.password", "Mot de passe"),
    ("auth.password_confirm", "Confirmer le mot de passe"),
    (
        "auth.recover_password.button",
        "Envoyer un email de récupération",
    ),
    ("auth.recover_password.header", "Récupérer le mot de passe"),
    (
        "auth.recover_password.subheader",
        "Entrez votre email pour récupérer votre mot de passe",
    ),
    ("auth.reset_password.button", "Réinitialiser le mot de passe"),
    (
        "auth.reset_password.header",
        "Réinitialiser le mot de passe pour l'email {email}",
    ),
    (
        "auth.reset_password.subheader",
        "Entrez votre nouveau mot de passe",
    ),
    ("auth.sign_up.header", "Créer un compte"),
    (
        "auth.sign_up.subheader",
        "Entrez votre email afin de créer un compte",
    ),
    ("auth.success.recovery_email", "Email de récupération envoyé"),
    ("auth.success.reset_password", "Mot de passe réinitialisé"),
    ("forms.continue", "Continuer"),
    (
        "forms.errors.accepted_image_types",
        "Les types d'image acceptés sont {accepted_image_types}",
    ),
    (
        "forms.errors.max_file_size",
        "La taille maximale du fichier est de {max_file_size}",
    ),
    (
        "forms.errors.max_length",
        "Ce champ doit contenir au plus {max_length} caractères",
    ),
    (
        "forms.errors.min_length",
        "Ce champ doit contenir au moins {min_length} caractères",
    ),
    ("forms.errors.required", "Champ obligatoire"),
    ("forms.go_back", "Retour"),
    ("forms.save", "Sauvegarder"),
    ("go_to_app", "Aller à l'application"),
    (
        "server.auth.invalid.invalid_credentials",
        "Identifiants invalides",
    ),
    (
        "server.auth.invalid.password_not_strong",
        "Mot de passe pas assez fort",
    ),
    ("server.internal_server_error", "Erreur interne du serveur"),
    (
        "server.user.conflict.email_already_registered",
        "Email déjà enregistré",
    ),
    ("server.user.invalid.inactive", "Utilisateur inactif"),
    (
        "server.user.update_success",
        "Utilisateur mis à jour avec succès",
    ),
    ("settings.header", "Paramètres"),
    ("settings.language.header", "Langue"),
    ("settings.theme.auto", "Auto"),
    ("settings.theme.dark", "Sombre"),
    ("settings.theme.header", "Thème"),
    ("settings.theme.light", "Clair"),
    ("user.edit_profile_modal.avatar", "Avatar"),
    ("user.edit_profile_modal.header", "Modifier le profil"),
    ("user.first_name", "Prénom"),
    ("user.last_name", "Nom de famille"),
    ("user.profile", "Profil"),
    ("user.success.update", "Utilisateur mis à jour avec succès"),
    ("user.username", "Nom d'utilisateur"),
    ("welcome", "Bienvenue"),
];
